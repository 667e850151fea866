use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

use crate::utils::errors::ApiError;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Owning user. Every pet has exactly one owner; reads and writes are
    /// always filtered on this field.
    pub user_id: ObjectId,
    pub name: String,
    pub breed: String,
    pub age: u32,
    pub gender: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PetCreateRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PetUpdateRequest {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

fn missing_fields() -> ApiError {
    ApiError::BadRequest("All fields are required".to_string())
}

impl Pet {
    pub fn from_request(owner: ObjectId, request: PetCreateRequest) -> Result<Pet, ApiError> {
        let name = request.name.filter(|name| !name.is_empty());
        let breed = request.breed.filter(|breed| !breed.is_empty());
        let gender = request.gender.filter(|gender| !gender.is_empty());

        match (name, breed, request.age, gender) {
            (Some(name), Some(breed), Some(age), Some(gender)) => Ok(Pet {
                id: None,
                user_id: owner,
                name,
                breed,
                age,
                gender,
                created_at: Utc::now(),
            }),
            _ => Err(missing_fields()),
        }
    }
}

impl PetUpdateRequest {
    /// Builds the `$set` document for an edit. Name, breed and age are
    /// always expected; gender only changes when the client sends it.
    pub fn into_update_document(self) -> Result<Document, ApiError> {
        let name = self.name.filter(|name| !name.is_empty());
        let breed = self.breed.filter(|breed| !breed.is_empty());

        let (name, breed, age) = match (name, breed, self.age) {
            (Some(name), Some(breed), Some(age)) => (name, breed, age),
            _ => return Err(missing_fields()),
        };

        let mut fields = doc! {
            "name": name,
            "breed": breed,
            "age": age as i64,
        };
        if let Some(gender) = self.gender.filter(|gender| !gender.is_empty()) {
            fields.insert("gender", gender);
        }

        Ok(doc! { "$set": fields })
    }
}
