use axum::{
    Router,
    routing::{delete, patch, post},
};

use crate::state::AppState;

use super::controller::{approve_booking, create_booking, delete_booking, get_bookings};

pub fn init_bookings_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking).get(get_bookings))
        .route("/{id}", delete(delete_booking))
        .route("/{id}/approve", patch(approve_booking))
}
