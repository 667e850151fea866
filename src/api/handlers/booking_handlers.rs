use actix_web::{web, HttpResponse, Responder, ResponseError};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::api::state::AppState;
use crate::domain::booking::model::{Booking, BookingCreateRequest, BookingStatus, BookingType};
use crate::domain::booking::repository::BookingRepository;
use crate::infrastructure::mongodb::booking_repository::MongoBookingRepository;
use crate::utils::errors::ApiError;
use crate::utils::session::Principal;

#[derive(Deserialize)]
pub struct BookingListQuery {
    #[serde(rename = "type")]
    pub booking_type: Option<BookingType>,
}

#[derive(Deserialize)]
pub struct AdminBookingQuery {
    #[serde(rename = "type")]
    pub booking_type: Option<BookingType>,
    pub status: Option<BookingStatus>,
}

fn parse_booking_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid booking id".to_string()))
}

pub async fn create_booking(
    state: web::Data<AppState>,
    principal: Principal,
    request: web::Json<BookingCreateRequest>,
) -> impl Responder {
    let owner = match principal.0.object_id() {
        Ok(owner) => owner,
        Err(e) => return e.error_response(),
    };

    let booking = match Booking::from_request(owner, request.into_inner()) {
        Ok(booking) => booking,
        Err(e) => return e.error_response(),
    };

    let repo = MongoBookingRepository::new(&state.db);
    match repo.create_booking(booking).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => e.error_response(),
    }
}

pub async fn list_bookings(
    state: web::Data<AppState>,
    principal: Principal,
    query: web::Query<BookingListQuery>,
) -> impl Responder {
    let owner = match principal.0.object_id() {
        Ok(owner) => owner,
        Err(e) => return e.error_response(),
    };
    let Some(booking_type) = query.booking_type else {
        return ApiError::BadRequest("Booking type is required".to_string()).error_response();
    };

    let repo = MongoBookingRepository::new(&state.db);
    match repo.list_bookings(owner, booking_type).await {
        Ok(bookings) => HttpResponse::Ok().json(json!({ "success": true, "bookings": bookings })),
        Err(e) => e.error_response(),
    }
}

pub async fn delete_booking(
    state: web::Data<AppState>,
    principal: Principal,
    path: web::Path<String>,
) -> impl Responder {
    let owner = match principal.0.object_id() {
        Ok(owner) => owner,
        Err(e) => return e.error_response(),
    };
    let booking_id = match parse_booking_id(&path.into_inner()) {
        Ok(booking_id) => booking_id,
        Err(e) => return e.error_response(),
    };

    let repo = MongoBookingRepository::new(&state.db);
    match repo.delete_booking(owner, booking_id).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true })),
        Err(e) => e.error_response(),
    }
}

pub async fn admin_list_bookings(
    state: web::Data<AppState>,
    query: web::Query<AdminBookingQuery>,
) -> impl Responder {
    let (Some(booking_type), Some(status)) = (query.booking_type, query.status) else {
        return ApiError::BadRequest("Type and status are required".to_string()).error_response();
    };

    let repo = MongoBookingRepository::new(&state.db);
    match repo.list_bookings_for_admin(booking_type, status).await {
        Ok(bookings) => HttpResponse::Ok().json(json!({ "success": true, "bookings": bookings })),
        Err(e) => e.error_response(),
    }
}

async fn review_booking(
    state: web::Data<AppState>,
    path: web::Path<String>,
    status: BookingStatus,
    message: &str,
) -> HttpResponse {
    let booking_id = match parse_booking_id(&path.into_inner()) {
        Ok(booking_id) => booking_id,
        Err(e) => return e.error_response(),
    };

    let repo = MongoBookingRepository::new(&state.db);
    match repo.set_booking_status(booking_id, status).await {
        Ok(_) => HttpResponse::Ok().json(json!({ "success": true, "message": message })),
        Err(e) => e.error_response(),
    }
}

pub async fn approve_booking(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    review_booking(state, path, BookingStatus::Approved, "Booking approved").await
}

pub async fn reject_booking(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    review_booking(state, path, BookingStatus::Rejected, "Booking rejected").await
}
