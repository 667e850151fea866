use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use crate::domain::pet::model::Pet;
use crate::utils::errors::ApiError;

/// Owner-scoped pet persistence. Mutations silently affect nothing when the
/// owner does not match, which the implementations report as `NotFound`.
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn list_pets(&self, owner: ObjectId) -> Result<Vec<Pet>, ApiError>;

    async fn add_pet(&self, pet: Pet) -> Result<(), ApiError>;

    async fn update_pet(
        &self,
        owner: ObjectId,
        pet_id: ObjectId,
        update: Document,
    ) -> Result<(), ApiError>;

    async fn delete_pet(&self, owner: ObjectId, pet_id: ObjectId) -> Result<(), ApiError>;
}
