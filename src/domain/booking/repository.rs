use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::booking::model::{
    AdminBookingView, Booking, BookingStatus, BookingType, BookingWithPets,
};
use crate::utils::errors::ApiError;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create_booking(&self, booking: Booking) -> Result<(), ApiError>;

    /// The owner's bookings of one type, each joined with its pet documents.
    async fn list_bookings(
        &self,
        owner: ObjectId,
        booking_type: BookingType,
    ) -> Result<Vec<BookingWithPets>, ApiError>;

    /// Every booking of the given type and status, joined with pet documents
    /// and the owning user's display fields.
    async fn list_bookings_for_admin(
        &self,
        booking_type: BookingType,
        status: BookingStatus,
    ) -> Result<Vec<AdminBookingView>, ApiError>;

    /// Sets the status unconditionally. Repeating a transition is a no-op
    /// that still succeeds; an unknown id is `NotFound`.
    async fn set_booking_status(
        &self,
        booking_id: ObjectId,
        status: BookingStatus,
    ) -> Result<(), ApiError>;

    async fn delete_booking(&self, owner: ObjectId, booking_id: ObjectId) -> Result<(), ApiError>;
}
