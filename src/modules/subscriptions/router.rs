use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_subscription, get_subscriptions_with_users};

pub fn init_subscriptions_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_subscription))
        .route("/users", get(get_subscriptions_with_users))
}
