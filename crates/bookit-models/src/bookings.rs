//! Booking domain models and DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dates::deserialize_date;
use crate::users::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    #[serde(rename = "fromDate")]
    pub from_date: NaiveDate,
    #[serde(rename = "toDate")]
    pub to_date: NaiveDate,
    #[serde(rename = "isApproved")]
    pub is_approved: bool,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A booking with its owning user embedded, as returned by the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingWithUser {
    #[serde(flatten)]
    pub booking: Booking,
    pub user: User,
}

/// Booking creation payload. The range is stored as given; timestamps are
/// truncated to their calendar date.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(deserialize_with = "deserialize_date")]
    #[schema(example = "2025-03-01")]
    pub from_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    #[schema(example = "2025-03-05")]
    pub to_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    #[schema(example = "Booking created successfully.")]
    pub message: String,
    pub booking: Booking,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingListResponse {
    #[schema(example = "Bookings retrieved successfully.")]
    pub message: String,
    pub bookings: Vec<BookingWithUser>,
}
