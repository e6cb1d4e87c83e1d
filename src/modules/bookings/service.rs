use std::collections::HashMap;

use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use bookit_core::AppError;
use bookit_models::{Booking, BookingWithUser, CreateBookingRequest, User};

use crate::modules::users::UserService;

const BOOKING_COLUMNS: &str = "id, from_date, to_date, is_approved, user_id, created_at, updated_at";

const CREATE_FAILED: &str = "An error occurred while creating the booking.";
const APPROVE_FAILED: &str = "An error occurred while approving the booking.";
const LIST_FAILED: &str = "An error occurred while retrieving bookings.";
const DELETE_FAILED: &str = "An error occurred while deleting the booking.";

fn booking_not_found() -> AppError {
    AppError::not_found(anyhow!("Booking not found."))
}

pub struct BookingService;

impl BookingService {
    /// Stores an unapproved booking owned by `user_id`. The date range is
    /// stored as given.
    #[instrument(skip(db))]
    pub async fn create_booking(
        db: &PgPool,
        user_id: Uuid,
        dto: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "INSERT INTO bookings (from_date, to_date, is_approved, user_id)
             VALUES ($1, $2, FALSE, $3)
             RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(dto.from_date)
        .bind(dto.to_date)
        .bind(user_id)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from(e).context(CREATE_FAILED))?;

        Ok(booking)
    }

    #[instrument(skip(db))]
    pub async fn approve_booking(db: &PgPool, id: Uuid) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET is_approved = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            BOOKING_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| AppError::from(e).context(APPROVE_FAILED))?
        .ok_or_else(booking_not_found)
    }

    /// Every booking with its owner, in insertion order.
    #[instrument(skip(db))]
    pub async fn get_bookings_with_users(db: &PgPool) -> Result<Vec<BookingWithUser>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings ORDER BY seq",
            BOOKING_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(|e| AppError::from(e).context(LIST_FAILED))?;

        let mut owner_ids: Vec<Uuid> = bookings.iter().map(|b| b.user_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let owners: HashMap<Uuid, User> = UserService::find_many(db, &owner_ids)
            .await
            .map_err(|e| e.context(LIST_FAILED))?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        bookings
            .into_iter()
            .map(|booking| {
                let user = owners.get(&booking.user_id).cloned().ok_or_else(|| {
                    AppError::internal_error(format!("Owner of booking {} not found", booking.id))
                        .context(LIST_FAILED)
                })?;
                Ok(BookingWithUser { booking, user })
            })
            .collect()
    }

    #[instrument(skip(db))]
    pub async fn delete_booking(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(|e| AppError::from(e).context(DELETE_FAILED))?;

        if result.rows_affected() == 0 {
            return Err(booking_not_found());
        }

        Ok(())
    }
}

/// Booking ids arrive as raw path segments; anything that is not a UUID
/// cannot name an existing booking.
pub fn parse_booking_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| booking_not_found())
}
