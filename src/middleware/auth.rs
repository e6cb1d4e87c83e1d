use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use uuid::Uuid;

use bookit_auth::{Claims, verify_token};
use bookit_core::AppError;
use bookit_models::{RoleName, User};

use crate::modules::auth::service::AuthService;
use crate::modules::roles::service::RoleService;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// The caller behind a valid, unrevoked bearer token.
///
/// Roles are read from the database on every request, so role changes take
/// effect without reissuing tokens.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
    pub roles: Vec<RoleName>,
    pub claims: Claims,
}

impl AuthUser {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// Resolves the caller from the `Authorization` header.
    ///
    /// Fails with `Unauthenticated` when the header is missing, the token is
    /// invalid, expired or revoked, or its user no longer exists.
    pub async fn resolve(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::unauthorized("Unauthenticated.".to_string()))?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;
        let token_id = claims.token_id()?;

        if AuthService::is_token_revoked(&state.db, token_id).await? {
            return Err(AppError::unauthorized(
                "Token has been invalidated".to_string(),
            ));
        }

        let user = UserService::find_by_id(&state.db, claims.user_id()?)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthenticated.".to_string()))?;

        let roles = RoleService::roles_for_user(&state.db, user.id).await?;

        Ok(AuthUser {
            user,
            roles,
            claims,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }
        AuthUser::resolve(parts, state).await
    }
}

/// Route layer that rejects unauthenticated requests before any handler runs
/// and stores the resolved [`AuthUser`] in the request extensions.
///
/// ```rust,ignore
/// Router::new()
///     .route("/me", get(me))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let auth_user = match AuthUser::resolve(&mut parts, &state).await {
        Ok(auth_user) => auth_user,
        Err(err) => return err.into_response(),
    };

    tracing::debug!(user_id = %auth_user.user.id, "Authenticated request");

    parts.extensions.insert(auth_user);
    next.run(Request::from_parts(parts, body)).await
}
