//! Feature modules.
//!
//! HTTP-facing modules are split into `controller.rs` (handlers and OpenAPI
//! annotations), `service.rs` (queries and business rules) and `router.rs`.
//! `users` and `roles` only have services; they back the auth flow and the
//! CLI.

pub mod auth;
pub mod bookings;
pub mod roles;
pub mod subscriptions;
pub mod users;
