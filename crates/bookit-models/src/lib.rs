//! # Bookit Models
//!
//! Database entities, request DTOs and response envelopes for the Bookit API.
//!
//! # Modules
//!
//! - [`auth`]: login request, token envelope, current-user response
//! - [`bookings`]: booking records and their DTOs
//! - [`dates`]: lenient calendar-date parsing for request fields
//! - [`input`]: request fields that accept any JSON value
//! - [`roles`]: the two fixed roles and their well-known IDs
//! - [`subscriptions`]: subscription records and their DTOs
//! - [`users`]: user records and the registration DTO

pub mod auth;
pub mod bookings;
pub mod dates;
pub mod input;
pub mod roles;
pub mod subscriptions;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, MeResponse, MessageResponse, TokenResponse};
pub use bookings::{Booking, BookingListResponse, BookingResponse, BookingWithUser, CreateBookingRequest};
pub use input::FieldInput;
pub use roles::{RoleName, system_roles};
pub use subscriptions::{
    CreateSubscriptionRequest, Subscription, SubscriptionListResponse, SubscriptionResponse,
    SubscriptionWithUser,
};
pub use users::{RegisterRequest, User};
