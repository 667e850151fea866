use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::user::model::{LoginRequest, User};
use crate::utils::errors::ApiError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user, rejecting duplicate emails with `Conflict`.
    async fn create_user(&self, user: User) -> Result<(), ApiError>;

    /// Returns the stored user when the email exists and the password hash
    /// matches, `None` otherwise.
    async fn verify_credentials(&self, credentials: LoginRequest) -> Result<Option<User>, ApiError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError>;
}
