use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::utils::auth::AuthUtils;
use crate::utils::errors::ApiError;

/// Stored shape of a `users` document. Field names stay camelCase to match
/// the wire format the dashboard scripts consume.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_name: String,
    pub email: String,
    pub contact: String,
    pub password: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The authenticated identity carried in the session cookie. Mirrors the
/// stored user minus the password hash.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub is_admin: bool,
}

fn required(value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ApiError::BadRequest("All fields are required".to_string())),
    }
}

impl User {
    /// Validates a signup payload and builds the document to insert,
    /// hashing the password on the way in.
    pub fn from_signup(request: SignupRequest) -> Result<User, ApiError> {
        let full_name = required(request.full_name)?;
        let email = required(request.email)?;
        let contact = required(request.contact)?;
        let password = required(request.password)?;

        Ok(User {
            id: None,
            full_name,
            email,
            contact,
            password: AuthUtils::hash_password(&password),
            is_admin: request.is_admin,
            created_at: Utc::now(),
        })
    }

    pub fn principal(&self) -> Result<SessionUser, ApiError> {
        let id = self
            .id
            .ok_or_else(|| ApiError::InternalServerError("user record missing id".to_string()))?;

        Ok(SessionUser {
            id: id.to_hex(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
        })
    }
}

impl LoginRequest {
    pub fn into_fields(self) -> Result<(String, String), ApiError> {
        let email = match self.email {
            Some(email) if !email.is_empty() => email,
            _ => {
                return Err(ApiError::BadRequest(
                    "Email and password are required".to_string(),
                ))
            }
        };
        let password = match self.password {
            Some(password) if !password.is_empty() => password,
            _ => {
                return Err(ApiError::BadRequest(
                    "Email and password are required".to_string(),
                ))
            }
        };
        Ok((email, password))
    }
}

impl SessionUser {
    /// Role-based landing page used by the login response.
    pub fn dashboard_path(&self) -> &'static str {
        if self.is_admin {
            "/admin"
        } else {
            "/user"
        }
    }

    pub fn object_id(&self) -> Result<ObjectId, ApiError> {
        ObjectId::parse_str(&self.id)
            .map_err(|_| ApiError::Unauthorized("Invalid session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_request() -> SignupRequest {
        SignupRequest {
            full_name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            contact: Some("555-0100".to_string()),
            password: Some("pw".to_string()),
            is_admin: false,
        }
    }

    #[test]
    fn test_from_signup_hashes_password() {
        let user = User::from_signup(signup_request()).unwrap();

        assert_eq!(user.full_name, "Ada Lovelace");
        assert_ne!(user.password, "pw");
        assert!(AuthUtils::verify_password("pw", &user.password));
        assert!(!user.is_admin);
    }

    #[test]
    fn test_from_signup_rejects_missing_fields() {
        let mut request = signup_request();
        request.contact = None;
        assert!(matches!(
            User::from_signup(request),
            Err(ApiError::BadRequest(_))
        ));

        let mut request = signup_request();
        request.email = Some(String::new());
        assert!(matches!(
            User::from_signup(request),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_principal_mirrors_user_minus_password() {
        let mut user = User::from_signup(signup_request()).unwrap();
        let oid = ObjectId::new();
        user.id = Some(oid);

        let principal = user.principal().unwrap();
        assert_eq!(principal.id, oid.to_hex());
        assert_eq!(principal.full_name, user.full_name);
        assert_eq!(principal.email, user.email);
        assert_eq!(principal.is_admin, user.is_admin);

        let json = serde_json::to_value(&principal).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("fullName").is_some());
    }

    #[test]
    fn test_principal_requires_id() {
        let user = User::from_signup(signup_request()).unwrap();
        assert!(user.principal().is_err());
    }

    #[test]
    fn test_dashboard_path_by_role() {
        let mut user = User::from_signup(signup_request()).unwrap();
        user.id = Some(ObjectId::new());

        assert_eq!(user.principal().unwrap().dashboard_path(), "/user");

        user.is_admin = true;
        assert_eq!(user.principal().unwrap().dashboard_path(), "/admin");
    }

    #[test]
    fn test_login_request_requires_both_fields() {
        let request = LoginRequest {
            email: Some("ada@example.com".to_string()),
            password: None,
        };
        assert!(request.into_fields().is_err());

        let request = LoginRequest {
            email: Some("ada@example.com".to_string()),
            password: Some("pw".to_string()),
        };
        let (email, password) = request.into_fields().unwrap();
        assert_eq!(email, "ada@example.com");
        assert_eq!(password, "pw");
    }
}
