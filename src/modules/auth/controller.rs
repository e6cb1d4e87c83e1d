use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use utoipa::ToSchema;

use bookit_core::AppError;
use bookit_models::{LoginRequest, MeResponse, MessageResponse, RegisterRequest, TokenResponse};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::JsonBody;

use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new user with the `user` role
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered and signed in", body = TokenResponse),
        (status = 400, description = "Validation failed or username/email already taken"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let response = AuthService::register(&state.db, &state.jwt_config, dto).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::login(&state.db, &state.jwt_config, dto).await?;
    Ok(Json(response))
}

/// Invalidate the presented token
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user.id))]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    let response = AuthService::logout(&state.db, &auth_user).await?;
    Ok(Json(response))
}

/// Exchange the presented token for a new one
#[utoipa::path(
    post,
    path = "/api/refresh",
    responses(
        (status = 200, description = "New token issued; the old one is invalidated", body = TokenResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user.id))]
pub async fn refresh(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<TokenResponse>, AppError> {
    let response = AuthService::refresh(&state.db, &state.jwt_config, &auth_user).await?;
    Ok(Json(response))
}

/// The authenticated user and their roles
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Unauthenticated", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(auth_user), fields(user_id = %auth_user.user.id))]
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(AuthService::current_user(&auth_user))
}
