use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use bookit_core::AppError;
use bookit_models::{CreateSubscriptionRequest, SubscriptionListResponse, SubscriptionResponse};

use crate::middleware::policy::{CanCreateSubscription, CanListSubscriptions};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::SubscriptionService;

#[utoipa::path(
    post,
    path = "/api/subscriptions",
    request_body = CreateSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription created", body = SubscriptionResponse),
        (status = 400, description = "Missing or invalid dates, or toDate not after fromDate"),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    tag = "Subscriptions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user.id))]
pub async fn create_subscription(
    State(state): State<AppState>,
    CanCreateSubscription(auth_user): CanCreateSubscription,
    ValidatedJson(dto): ValidatedJson<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), AppError> {
    let (from_date, to_date) = dto.date_range().ok_or_else(|| {
        AppError::internal_error("Subscription dates missing after validation".to_string())
    })?;

    let subscription = SubscriptionService::create_subscription(
        &state.db,
        auth_user.user_id(),
        from_date,
        to_date,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse {
            message: "Subscription created successfully.".to_string(),
            subscription,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/subscriptions/users",
    responses(
        (status = 200, description = "All subscriptions with their owners", body = SubscriptionListResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    tag = "Subscriptions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_subscriptions_with_users(
    State(state): State<AppState>,
    CanListSubscriptions(_auth_user): CanListSubscriptions,
) -> Result<Json<SubscriptionListResponse>, AppError> {
    let subscriptions = SubscriptionService::get_subscriptions_with_users(&state.db).await?;

    Ok(Json(SubscriptionListResponse {
        message: "Subscriptions retrieved successfully.".to_string(),
        subscriptions,
    }))
}
