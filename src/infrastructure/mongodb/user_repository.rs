use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::Collection;

use crate::domain::user::model::{LoginRequest, User};
use crate::domain::user::repository::UserRepository;
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::auth::AuthUtils;
use crate::utils::errors::ApiError;

pub struct MongoUserRepository {
    users: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            users: context.collection("users"),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create_user(&self, user: User) -> Result<(), ApiError> {
        // Check-then-insert; two concurrent signups with the same email can
        // still both land. No unique index backs this up.
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        self.users.insert_one(&user).await?;
        Ok(())
    }

    async fn verify_credentials(
        &self,
        credentials: LoginRequest,
    ) -> Result<Option<User>, ApiError> {
        let (email, password) = credentials.into_fields()?;

        let user = self.find_by_email(&email).await?;
        if let Some(user) = user {
            if AuthUtils::verify_password(&password, &user.password) {
                return Ok(Some(user));
            }
            return Ok(None); // Password mismatch
        }
        Ok(None) // No such email
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        match self.users.find_one(doc! { "email": email }).await {
            Ok(user) => Ok(user),
            Err(e) => Err(ApiError::MongoError(e)),
        }
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError> {
        match self.users.find_one(doc! { "_id": id }).await {
            Ok(user) => Ok(user),
            Err(e) => Err(ApiError::MongoError(e)),
        }
    }
}

// Integration tests run against a local MongoDB and skip when none responds.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::model::SignupRequest;

    async fn test_context() -> Option<MongoContext> {
        match MongoContext::init("mongodb://localhost:27017", "hungry-paws-test").await {
            Ok(context) => Some(context),
            Err(_) => {
                println!("MongoDB not available, skipping test");
                None
            }
        }
    }

    fn signup(email: &str) -> User {
        User::from_signup(SignupRequest {
            full_name: Some("Test User".to_string()),
            email: Some(email.to_string()),
            contact: Some("555-0100".to_string()),
            password: Some("pw".to_string()),
            is_admin: false,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let Some(context) = test_context().await else {
            return;
        };
        let repo = MongoUserRepository::new(&context);
        let email = format!("{}@example.com", ObjectId::new().to_hex());

        repo.create_user(signup(&email)).await.unwrap();

        let second = repo.create_user(signup(&email)).await;
        assert!(matches!(second, Err(ApiError::Conflict(_))));

        // Still exactly one stored record for that email.
        let found = repo.find_by_email(&email).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_verify_credentials_round_trip() {
        let Some(context) = test_context().await else {
            return;
        };
        let repo = MongoUserRepository::new(&context);
        let email = format!("{}@x.com", ObjectId::new().to_hex());

        repo.create_user(signup(&email)).await.unwrap();

        let user = repo
            .verify_credentials(LoginRequest {
                email: Some(email.clone()),
                password: Some("pw".to_string()),
            })
            .await
            .unwrap()
            .expect("credentials should match");
        assert_eq!(user.email, email);
        assert_eq!(user.principal().unwrap().dashboard_path(), "/user");

        let mismatch = repo
            .verify_credentials(LoginRequest {
                email: Some(email),
                password: Some("wrong".to_string()),
            })
            .await
            .unwrap();
        assert!(mismatch.is_none());
    }
}
