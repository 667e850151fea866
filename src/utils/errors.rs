use actix_web::{HttpResponse, ResponseError};
use mongodb::bson;
use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Error taxonomy for the whole API surface. Every handler reports failures
/// through this type so the client always receives the same
/// `{"success": false, "message": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    /// Duplicate email at signup. Renders as 400; the client reads only the
    /// message text.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Server error: {0}")]
    InternalServerError(String),

    #[error(transparent)]
    MongoError(#[from] MongoError),

    #[error("Invalid data format")]
    SerializationError(#[from] bson::ser::Error),

    #[error("Invalid data format")]
    DeserializationError(#[from] bson::de::Error),
}

impl ApiError {
    fn body(&self) -> serde_json::Value {
        let message = match self {
            ApiError::MongoError(_) => "Server error".to_string(),
            other => other.to_string(),
        };
        serde_json::json!({
            "success": false,
            "message": message,
        })
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest(_) | ApiError::Conflict(_) => {
                HttpResponse::BadRequest().json(self.body())
            }
            ApiError::Unauthorized(_) => HttpResponse::Unauthorized().json(self.body()),
            ApiError::NotFound(_) => HttpResponse::NotFound().json(self.body()),
            ApiError::InternalServerError(_) | ApiError::MongoError(_) => {
                HttpResponse::InternalServerError().json(self.body())
            }
            ApiError::SerializationError(_) | ApiError::DeserializationError(_) => {
                HttpResponse::BadRequest().json(self.body())
            }
        }
    }
}

// ----------------------------- TESTS --------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use serde_json::Value;

    async fn extract_json_from_response(response: HttpResponse) -> Value {
        let body = response.into_body();
        let bytes = actix_web::body::to_bytes(body).await.unwrap();
        serde_json::from_slice(&bytes).expect("Failed to parse JSON response")
    }

    #[actix_web::test]
    async fn test_bad_request_response() {
        let error = ApiError::BadRequest("All fields are required".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["success"], Value::Bool(false));
        assert_eq!(json["message"], "All fields are required");
    }

    #[actix_web::test]
    async fn test_unauthorized_response() {
        let error = ApiError::Unauthorized("Invalid email or password".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["message"], "Invalid email or password");
    }

    #[actix_web::test]
    async fn test_conflict_maps_to_400() {
        let error = ApiError::Conflict("Email already registered".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["success"], Value::Bool(false));
        assert_eq!(json["message"], "Email already registered");
    }

    #[actix_web::test]
    async fn test_not_found_response() {
        let error = ApiError::NotFound("Booking not found".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_internal_server_error_response() {
        let error = ApiError::InternalServerError("storage unavailable".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["message"], "Server error: storage unavailable");
    }

    #[actix_web::test]
    async fn test_bson_error_is_bad_request() {
        use serde::ser::Error as _;

        let bson_error = bson::ser::Error::custom("bad document");
        let error = ApiError::from(bson_error);
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = extract_json_from_response(response).await;
        assert_eq!(json["message"], "Invalid data format");
    }
}
