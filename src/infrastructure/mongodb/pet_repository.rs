use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use crate::domain::pet::model::Pet;
use crate::domain::pet::repository::PetRepository;
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::errors::ApiError;

pub struct MongoPetRepository {
    pets: Collection<Pet>,
}

impl MongoPetRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            pets: context.collection("pets"),
        }
    }
}

#[async_trait]
impl PetRepository for MongoPetRepository {
    async fn list_pets(&self, owner: ObjectId) -> Result<Vec<Pet>, ApiError> {
        let mut cursor = self.pets.find(doc! { "userId": owner }).await?;
        let mut pets = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(pet) => pets.push(pet),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(pets)
    }

    async fn add_pet(&self, pet: Pet) -> Result<(), ApiError> {
        self.pets.insert_one(&pet).await?;
        Ok(())
    }

    async fn update_pet(
        &self,
        owner: ObjectId,
        pet_id: ObjectId,
        update: Document,
    ) -> Result<(), ApiError> {
        // Filtering on both _id and userId makes "not yours" and "does not
        // exist" indistinguishable, which is what the API reports.
        let filter = doc! { "_id": pet_id, "userId": owner };
        let result = self.pets.update_one(filter, update).await?;

        if result.modified_count == 0 {
            return Err(ApiError::NotFound("Pet not found".to_string()));
        }
        Ok(())
    }

    async fn delete_pet(&self, owner: ObjectId, pet_id: ObjectId) -> Result<(), ApiError> {
        let filter = doc! { "_id": pet_id, "userId": owner };
        let result = self.pets.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Err(ApiError::NotFound("Pet not found".to_string()));
        }
        Ok(())
    }
}
