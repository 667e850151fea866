use actix_web::{web, HttpResponse, Responder, ResponseError};
use mongodb::bson::oid::ObjectId;
use serde_json::json;

use crate::api::state::AppState;
use crate::domain::pet::model::{Pet, PetCreateRequest, PetUpdateRequest};
use crate::domain::pet::repository::PetRepository;
use crate::infrastructure::mongodb::pet_repository::MongoPetRepository;
use crate::utils::errors::ApiError;
use crate::utils::session::Principal;

fn parse_pet_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid pet id".to_string()))
}

pub async fn list_pets(state: web::Data<AppState>, principal: Principal) -> impl Responder {
    let owner = match principal.0.object_id() {
        Ok(owner) => owner,
        Err(e) => return e.error_response(),
    };

    let repo = MongoPetRepository::new(&state.db);
    match repo.list_pets(owner).await {
        Ok(pets) => HttpResponse::Ok().json(json!({ "success": true, "pets": pets })),
        Err(e) => e.error_response(),
    }
}

pub async fn add_pet(
    state: web::Data<AppState>,
    principal: Principal,
    request: web::Json<PetCreateRequest>,
) -> impl Responder {
    let owner = match principal.0.object_id() {
        Ok(owner) => owner,
        Err(e) => return e.error_response(),
    };

    let pet = match Pet::from_request(owner, request.into_inner()) {
        Ok(pet) => pet,
        Err(e) => return e.error_response(),
    };

    let repo = MongoPetRepository::new(&state.db);
    match repo.add_pet(pet).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => e.error_response(),
    }
}

pub async fn update_pet(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
    request: web::Json<PetUpdateRequest>,
) -> impl Responder {
    let owner = match principal.0.object_id() {
        Ok(owner) => owner,
        Err(e) => return e.error_response(),
    };
    let pet_id = match parse_pet_id(&path.into_inner()) {
        Ok(pet_id) => pet_id,
        Err(e) => return e.error_response(),
    };
    let update = match request.into_inner().into_update_document() {
        Ok(update) => update,
        Err(e) => return e.error_response(),
    };

    let repo = MongoPetRepository::new(&state.db);
    match repo.update_pet(owner, pet_id, update).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => e.error_response(),
    }
}

pub async fn delete_pet(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> impl Responder {
    let owner = match principal.0.object_id() {
        Ok(owner) => owner,
        Err(e) => return e.error_response(),
    };
    let pet_id = match parse_pet_id(&path.into_inner()) {
        Ok(pet_id) => pet_id,
        Err(e) => return e.error_response(),
    };

    let repo = MongoPetRepository::new(&state.db);
    match repo.delete_pet(owner, pet_id).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => e.error_response(),
    }
}
