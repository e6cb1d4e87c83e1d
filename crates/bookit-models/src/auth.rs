//! Authentication DTOs and response envelopes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::roles::RoleName;
use crate::users::User;

/// Login request with email and password.
///
/// Both fields default to empty so that a missing field is reported the same
/// way as a wrong password.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "secret123")]
    pub password: String,
}

/// Token envelope returned by register, login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
    pub user: User,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64, user: User) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// The authenticated user together with their role names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: User,
    pub roles: Vec<RoleName>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Successfully logged out")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
