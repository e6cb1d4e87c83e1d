use std::env;

/// Signing secret and lifetime for bearer tokens.
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in minutes.
    pub ttl_minutes: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            ttl_minutes: env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(60),
        }
    }

    /// Lifetime reported to clients as `expires_in`.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_seconds() {
        let config = JwtConfig {
            secret: "secret".to_string(),
            ttl_minutes: 15,
        };
        assert_eq!(config.ttl_seconds(), 900);
    }
}
