//! JWT claim set for access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bookit_core::AppError;

/// Claims embedded in every access token.
///
/// Roles are not embedded; they are resolved from the database per request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Unique token identifier, used for revocation
    pub jti: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token".to_string()))
    }

    pub fn token_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.jti)
            .map_err(|_| AppError::unauthorized("Invalid token identifier".to_string()))
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp as i64, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str, jti: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            email: "test@example.com".to_string(),
            jti: jti.to_string(),
            exp: 1_700_000_000,
            iat: 1_699_996_400,
        }
    }

    #[test]
    fn test_claims_serialize() {
        let claims = claims("user-id-123", "jti-1");
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""jti":"jti-1""#));
    }

    #[test]
    fn test_user_id_parses_uuid() {
        let user_id = Uuid::new_v4();
        let claims = claims(&user_id.to_string(), &Uuid::new_v4().to_string());
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_malformed_ids_are_unauthenticated() {
        let claims = claims("not-a-uuid", "also-not-a-uuid");
        assert!(claims.user_id().is_err());
        assert!(claims.token_id().is_err());
    }

    #[test]
    fn test_expires_at() {
        let claims = claims("user", "jti");
        assert_eq!(claims.expires_at().timestamp(), 1_700_000_000);
    }
}
