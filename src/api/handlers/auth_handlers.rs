use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde_json::json;

use crate::api::state::AppState;
use crate::domain::user::model::{LoginRequest, SignupRequest, User};
use crate::domain::user::repository::UserRepository;
use crate::infrastructure::mongodb::user_repository::MongoUserRepository;
use crate::utils::errors::ApiError;
use crate::utils::session::SessionContext;

pub async fn sign_up(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> impl Responder {
    log::info!("Signup request received");

    let user = match User::from_signup(request.into_inner()) {
        Ok(user) => user,
        Err(e) => return e.error_response(),
    };

    let repo = MongoUserRepository::new(&state.db);
    match repo.create_user(user).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => e.error_response(),
    }
}

pub async fn log_in(
    state: web::Data<AppState>,
    session: SessionContext,
    credentials: web::Json<LoginRequest>,
) -> impl Responder {
    let repo = MongoUserRepository::new(&state.db);

    match repo.verify_credentials(credentials.into_inner()).await {
        Ok(Some(user)) => {
            let principal = match user.principal() {
                Ok(principal) => principal,
                Err(e) => return e.error_response(),
            };
            if let Err(e) = session.persist_user(&principal) {
                return e.error_response();
            }

            HttpResponse::Ok().json(json!({
                "success": true,
                "redirect": principal.dashboard_path(),
                "user": principal,
            }))
        }
        Ok(None) => {
            ApiError::Unauthorized("Invalid email or password".to_string()).error_response()
        }
        Err(e) => e.error_response(),
    }
}

pub async fn log_out(session: SessionContext) -> impl Responder {
    session.purge();
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
