use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use bookit_core::AppError;
use bookit_models::{BookingListResponse, BookingResponse, CreateBookingRequest, MessageResponse};

use crate::middleware::policy::{
    CanApproveBooking, CanCreateBooking, CanDeleteBooking, CanListBookings,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::JsonBody;

use super::service::{BookingService, parse_booking_id};

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller lacks the user role", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user.id))]
pub async fn create_booking(
    State(state): State<AppState>,
    CanCreateBooking(auth_user): CanCreateBooking,
    JsonBody(dto): JsonBody<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = BookingService::create_booking(&state.db, auth_user.user_id(), dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Booking created successfully.".to_string(),
            booking,
        }),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/approve",
    params(
        ("id" = String, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking approved", body = BookingResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn approve_booking(
    State(state): State<AppState>,
    CanApproveBooking(_auth_user): CanApproveBooking,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let id = parse_booking_id(&id)?;
    let booking = BookingService::approve_booking(&state.db, id).await?;

    Ok(Json(BookingResponse {
        message: "Booking approved successfully.".to_string(),
        booking,
    }))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    responses(
        (status = 200, description = "All bookings with their owners", body = BookingListResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_bookings(
    State(state): State<AppState>,
    CanListBookings(_auth_user): CanListBookings,
) -> Result<Json<BookingListResponse>, AppError> {
    let bookings = BookingService::get_bookings_with_users(&state.db).await?;

    Ok(Json(BookingListResponse {
        message: "Bookings retrieved successfully.".to_string(),
        bookings,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(
        ("id" = String, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse)
    ),
    tag = "Bookings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn delete_booking(
    State(state): State<AppState>,
    CanDeleteBooking(_auth_user): CanDeleteBooking,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_booking_id(&id)?;
    BookingService::delete_booking(&state.db, id).await?;

    Ok(Json(MessageResponse::new("Booking deleted successfully.")))
}
