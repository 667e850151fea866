use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::pet::model::Pet;
use crate::utils::errors::ApiError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Grooming,
    Hotel,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Grooming => "grooming",
            BookingType::Hotel => "hotel",
        }
    }
}

/// Booking workflow state. New bookings start out `pending`; admins move
/// them to `approved` or `rejected`, in either direction, any number of
/// times. Owners never change status.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub pets: Vec<ObjectId>,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anti_rabies_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_checkout_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_checkout_time: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreateRequest {
    #[serde(rename = "type")]
    pub booking_type: Option<BookingType>,
    pub pets: Option<Vec<String>>,
    pub appointment_date: Option<String>,
    pub appointment_time: Option<String>,
    pub anti_rabies_date: Option<String>,
    pub hotel_checkout_date: Option<String>,
    pub hotel_checkout_time: Option<String>,
}

/// Form dates arrive as `YYYY-MM-DD` and are normalized to UTC midnight.
fn parse_date(value: &str) -> Result<DateTime<Utc>, ApiError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date: {}", value)))?;
    date.and_hms_opt(0, 0, 0)
        .map(|datetime| datetime.and_utc())
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid date: {}", value)))
}

fn parse_optional_date(value: Option<String>) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value {
        Some(text) if !text.is_empty() => parse_date(&text).map(Some),
        _ => Ok(None),
    }
}

impl Booking {
    /// Validates a booking payload and builds the document to insert.
    /// Grooming additionally requires the anti-rabies shot date; the hotel
    /// checkout fields are stored when present but not enforced here.
    pub fn from_request(owner: ObjectId, request: BookingCreateRequest) -> Result<Booking, ApiError> {
        let booking_type = request
            .booking_type
            .ok_or_else(|| ApiError::BadRequest("Booking type is required".to_string()))?;

        let pet_ids = request.pets.unwrap_or_default();
        if pet_ids.is_empty() {
            return Err(ApiError::BadRequest("At least one pet is required".to_string()));
        }
        let pets = pet_ids
            .iter()
            .map(|id| {
                ObjectId::parse_str(id)
                    .map_err(|_| ApiError::BadRequest(format!("Invalid pet id: {}", id)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let appointment_date = request
            .appointment_date
            .filter(|date| !date.is_empty())
            .ok_or_else(|| {
                ApiError::BadRequest("Appointment date and time are required".to_string())
            })?;
        let appointment_time = request
            .appointment_time
            .filter(|time| !time.is_empty())
            .ok_or_else(|| {
                ApiError::BadRequest("Appointment date and time are required".to_string())
            })?;

        let anti_rabies_date = parse_optional_date(request.anti_rabies_date)?;
        if booking_type == BookingType::Grooming && anti_rabies_date.is_none() {
            return Err(ApiError::BadRequest(
                "Anti-rabies date is required for grooming bookings".to_string(),
            ));
        }

        Ok(Booking {
            id: None,
            user_id: owner,
            booking_type,
            pets,
            appointment_date: parse_date(&appointment_date)?,
            appointment_time,
            anti_rabies_date,
            hotel_checkout_date: parse_optional_date(request.hotel_checkout_date)?,
            hotel_checkout_time: request.hotel_checkout_time.filter(|time| !time.is_empty()),
            status: BookingStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

/// A booking joined with its pet documents, as the owner dashboard lists it.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithPets {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub pets: Vec<Pet>,
    pub appointment_date: DateTime<Utc>,
    pub appointment_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anti_rabies_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_checkout_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_checkout_time: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingWithPets {
    pub fn new(booking: Booking, pets: Vec<Pet>) -> Result<BookingWithPets, ApiError> {
        let id = booking.id.ok_or_else(|| {
            ApiError::InternalServerError("booking record missing id".to_string())
        })?;

        Ok(BookingWithPets {
            id,
            booking_type: booking.booking_type,
            pets,
            appointment_date: booking.appointment_date,
            appointment_time: booking.appointment_time,
            anti_rabies_date: booking.anti_rabies_date,
            hotel_checkout_date: booking.hotel_checkout_date,
            hotel_checkout_time: booking.hotel_checkout_time,
            status: booking.status,
            created_at: booking.created_at,
        })
    }
}

/// Admin listing row: the joined pets plus the owning customer's display
/// fields.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminBookingView {
    #[serde(flatten)]
    pub booking: BookingWithPets,
    pub user_name: String,
    pub user_email: String,
}
