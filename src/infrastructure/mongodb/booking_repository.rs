use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use crate::domain::booking::model::{
    AdminBookingView, Booking, BookingStatus, BookingType, BookingWithPets,
};
use crate::domain::booking::repository::BookingRepository;
use crate::domain::pet::model::Pet;
use crate::domain::user::model::User;
use crate::infrastructure::database::mongo_context::MongoContext;
use crate::utils::errors::ApiError;

pub struct MongoBookingRepository {
    bookings: Collection<Booking>,
    pets: Collection<Pet>,
    users: Collection<User>,
}

impl MongoBookingRepository {
    pub fn new(context: &MongoContext) -> Self {
        Self {
            bookings: context.collection("bookings"),
            pets: context.collection("pets"),
            users: context.collection("users"),
        }
    }

    async fn find_bookings(&self, filter: Document) -> Result<Vec<Booking>, ApiError> {
        let mut cursor = self.bookings.find(filter).await?;
        let mut bookings = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(booking) => bookings.push(booking),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(bookings)
    }

    /// Resolves the booking's pet id set to full documents for display.
    async fn join_pets(&self, booking: &Booking) -> Result<Vec<Pet>, ApiError> {
        let filter = doc! { "_id": { "$in": booking.pets.clone() } };
        let mut cursor = self.pets.find(filter).await?;
        let mut pets = Vec::new();

        while let Some(doc) = cursor.next().await {
            match doc {
                Ok(pet) => pets.push(pet),
                Err(e) => return Err(ApiError::MongoError(e)),
            }
        }
        Ok(pets)
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn create_booking(&self, booking: Booking) -> Result<(), ApiError> {
        self.bookings.insert_one(&booking).await?;
        Ok(())
    }

    async fn list_bookings(
        &self,
        owner: ObjectId,
        booking_type: BookingType,
    ) -> Result<Vec<BookingWithPets>, ApiError> {
        let filter = doc! { "userId": owner, "type": booking_type.as_str() };
        let bookings = self.find_bookings(filter).await?;

        let mut joined = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let pets = self.join_pets(&booking).await?;
            joined.push(BookingWithPets::new(booking, pets)?);
        }
        Ok(joined)
    }

    async fn list_bookings_for_admin(
        &self,
        booking_type: BookingType,
        status: BookingStatus,
    ) -> Result<Vec<AdminBookingView>, ApiError> {
        let filter = doc! { "type": booking_type.as_str(), "status": status.as_str() };
        let bookings = self.find_bookings(filter).await?;

        let mut joined = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let pets = self.join_pets(&booking).await?;
            let user = self
                .users
                .find_one(doc! { "_id": booking.user_id })
                .await?;

            let (user_name, user_email) = match user {
                Some(user) => (user.full_name, user.email),
                // Bookings outlive their users only if records are removed
                // by hand; keep the row visible rather than dropping it.
                None => ("Unknown".to_string(), String::new()),
            };

            joined.push(AdminBookingView {
                booking: BookingWithPets::new(booking, pets)?,
                user_name,
                user_email,
            });
        }
        Ok(joined)
    }

    async fn set_booking_status(
        &self,
        booking_id: ObjectId,
        status: BookingStatus,
    ) -> Result<(), ApiError> {
        let filter = doc! { "_id": booking_id };
        let update = doc! { "$set": { "status": status.as_str() } };
        let result = self.bookings.update_one(filter, update).await?;

        // matched, not modified: re-approving an approved booking succeeds.
        if result.matched_count == 0 {
            return Err(ApiError::NotFound("Booking not found".to_string()));
        }
        Ok(())
    }

    async fn delete_booking(&self, owner: ObjectId, booking_id: ObjectId) -> Result<(), ApiError> {
        let filter = doc! { "_id": booking_id, "userId": owner };
        let result = self.bookings.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Err(ApiError::NotFound("Booking not found".to_string()));
        }
        Ok(())
    }
}

// Integration tests run against a local MongoDB and skip when none responds.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::model::BookingCreateRequest;
    use crate::domain::pet::model::PetCreateRequest;
    use crate::domain::pet::repository::PetRepository;
    use crate::domain::user::model::SignupRequest;
    use crate::domain::user::repository::UserRepository;
    use crate::infrastructure::mongodb::pet_repository::MongoPetRepository;
    use crate::infrastructure::mongodb::user_repository::MongoUserRepository;

    async fn test_context() -> Option<MongoContext> {
        match MongoContext::init("mongodb://localhost:27017", "hungry-paws-test").await {
            Ok(context) => Some(context),
            Err(_) => {
                println!("MongoDB not available, skipping test");
                None
            }
        }
    }

    async fn seed_owner_with_pet(context: &MongoContext) -> (ObjectId, ObjectId, String) {
        let users = MongoUserRepository::new(context);
        let pets = MongoPetRepository::new(context);

        let email = format!("{}@example.com", ObjectId::new().to_hex());
        users
            .create_user(
                User::from_signup(SignupRequest {
                    full_name: Some("Grace Hopper".to_string()),
                    email: Some(email.clone()),
                    contact: Some("555-0199".to_string()),
                    password: Some("pw".to_string()),
                    is_admin: false,
                })
                .unwrap(),
            )
            .await
            .unwrap();
        let owner = users
            .find_by_email(&email)
            .await
            .unwrap()
            .unwrap()
            .id
            .unwrap();

        pets.add_pet(
            Pet::from_request(
                owner,
                PetCreateRequest {
                    name: Some("Rex".to_string()),
                    breed: Some("Lab".to_string()),
                    age: Some(3),
                    gender: Some("male".to_string()),
                },
            )
            .unwrap(),
        )
        .await
        .unwrap();
        let pet_id = pets.list_pets(owner).await.unwrap()[0].id.unwrap();

        (owner, pet_id, email)
    }

    fn grooming(owner: ObjectId, pet_id: ObjectId) -> Booking {
        Booking::from_request(
            owner,
            BookingCreateRequest {
                booking_type: Some(BookingType::Grooming),
                pets: Some(vec![pet_id.to_hex()]),
                appointment_date: Some("2026-08-20".to_string()),
                appointment_time: Some("9:00 AM".to_string()),
                anti_rabies_date: Some("2026-07-01".to_string()),
                hotel_checkout_date: None,
                hotel_checkout_time: None,
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_owner_listing_joins_pets() {
        let Some(context) = test_context().await else {
            return;
        };
        let repo = MongoBookingRepository::new(&context);
        let (owner, pet_id, _) = seed_owner_with_pet(&context).await;

        repo.create_booking(grooming(owner, pet_id)).await.unwrap();

        let bookings = repo
            .list_bookings(owner, BookingType::Grooming)
            .await
            .unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].pets.len(), 1);
        assert_eq!(bookings[0].pets[0].name, "Rex");
        assert_eq!(bookings[0].status, BookingStatus::Pending);

        // Type filter keeps hotel bookings out.
        let hotel = repo.list_bookings(owner, BookingType::Hotel).await.unwrap();
        assert!(hotel.is_empty());
    }

    #[tokio::test]
    async fn test_admin_listing_joins_pets_and_customer() {
        let Some(context) = test_context().await else {
            return;
        };
        let repo = MongoBookingRepository::new(&context);
        let (owner, pet_id, email) = seed_owner_with_pet(&context).await;

        repo.create_booking(grooming(owner, pet_id)).await.unwrap();

        let pending = repo
            .list_bookings_for_admin(BookingType::Grooming, BookingStatus::Pending)
            .await
            .unwrap();
        let row = pending
            .iter()
            .find(|view| view.user_email == email)
            .expect("seeded booking should be pending");
        assert_eq!(row.user_name, "Grace Hopper");
        assert_eq!(row.booking.pets[0].name, "Rex");
    }

    #[tokio::test]
    async fn test_status_workflow_and_idempotent_approve() {
        let Some(context) = test_context().await else {
            return;
        };
        let repo = MongoBookingRepository::new(&context);
        let (owner, pet_id, _) = seed_owner_with_pet(&context).await;

        repo.create_booking(grooming(owner, pet_id)).await.unwrap();
        let id = repo
            .list_bookings(owner, BookingType::Grooming)
            .await
            .unwrap()[0]
            .id;

        repo.set_booking_status(id, BookingStatus::Approved)
            .await
            .unwrap();
        // Second identical transition is not an error.
        repo.set_booking_status(id, BookingStatus::Approved)
            .await
            .unwrap();

        let approved = repo
            .list_bookings(owner, BookingType::Grooming)
            .await
            .unwrap();
        assert_eq!(approved[0].status, BookingStatus::Approved);

        // Reversal stays open to admins.
        repo.set_booking_status(id, BookingStatus::Rejected)
            .await
            .unwrap();
        let rejected = repo
            .list_bookings(owner, BookingType::Grooming)
            .await
            .unwrap();
        assert_eq!(rejected[0].status, BookingStatus::Rejected);

        let missing = repo
            .set_booking_status(ObjectId::new(), BookingStatus::Approved)
            .await;
        assert!(matches!(missing, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_owner_scoped() {
        let Some(context) = test_context().await else {
            return;
        };
        let repo = MongoBookingRepository::new(&context);
        let (owner, pet_id, _) = seed_owner_with_pet(&context).await;

        repo.create_booking(grooming(owner, pet_id)).await.unwrap();
        let id = repo
            .list_bookings(owner, BookingType::Grooming)
            .await
            .unwrap()[0]
            .id;

        let foreign = repo.delete_booking(ObjectId::new(), id).await;
        assert!(matches!(foreign, Err(ApiError::NotFound(_))));

        repo.delete_booking(owner, id).await.unwrap();
        assert!(repo
            .list_bookings(owner, BookingType::Grooming)
            .await
            .unwrap()
            .is_empty());
    }
}
