//! Request authentication and authorization.
//!
//! - [`auth`]: resolves the bearer token into an [`auth::AuthUser`] and the
//!   `require_auth` route layer that rejects requests without one
//! - [`policy`]: the action/role table and the per-action extractors
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `require_auth` verifies the token, checks it has not been revoked and
//!    loads the user with their roles
//! 3. A policy extractor such as `CanApproveBooking` checks the role
//! 4. The handler runs
//!
//! ```ignore
//! use crate::middleware::policy::CanDeleteBooking;
//!
//! async fn delete_booking(CanDeleteBooking(auth_user): CanDeleteBooking) -> impl IntoResponse {
//!     // Only admins get here
//! }
//! ```

pub mod auth;
pub mod policy;
