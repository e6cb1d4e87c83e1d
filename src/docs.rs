use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use bookit_models::{
    Booking, BookingListResponse, BookingResponse, BookingWithUser, CreateBookingRequest,
    CreateSubscriptionRequest, LoginRequest, MeResponse, MessageResponse, RegisterRequest,
    RoleName, Subscription, SubscriptionListResponse, SubscriptionResponse, SubscriptionWithUser,
    TokenResponse, User,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::refresh,
        crate::modules::auth::controller::me,
        crate::modules::bookings::controller::create_booking,
        crate::modules::bookings::controller::approve_booking,
        crate::modules::bookings::controller::get_bookings,
        crate::modules::bookings::controller::delete_booking,
        crate::modules::subscriptions::controller::create_subscription,
        crate::modules::subscriptions::controller::get_subscriptions_with_users,
    ),
    components(
        schemas(
            User,
            RoleName,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            MeResponse,
            MessageResponse,
            ErrorResponse,
            Booking,
            BookingWithUser,
            CreateBookingRequest,
            BookingResponse,
            BookingListResponse,
            Subscription,
            SubscriptionWithUser,
            CreateSubscriptionRequest,
            SubscriptionResponse,
            SubscriptionListResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token management"),
        (name = "Bookings", description = "Date-range bookings with admin approval"),
        (name = "Subscriptions", description = "Date-range subscriptions")
    ),
    info(
        title = "Bookit API",
        version = "0.1.0",
        description = "Bookings and subscriptions API built with Rust, Axum, and PostgreSQL, secured with bearer tokens and admin/user roles.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/register",
            "/api/login",
            "/api/logout",
            "/api/refresh",
            "/api/me",
            "/api/bookings",
            "/api/bookings/{id}",
            "/api/bookings/{id}/approve",
            "/api/subscriptions",
            "/api/subscriptions/users",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {}",
                expected
            );
        }
    }
}
