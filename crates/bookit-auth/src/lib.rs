//! # Bookit Auth
//!
//! Bearer token primitives for the Bookit API:
//!
//! - [`claims`]: the JWT claim set carried by every access token
//! - [`jwt`]: token issuing and verification
//!
//! Tokens are stateless except for revocation: each one carries a unique
//! `jti` so logout and refresh can invalidate it before `exp`.
//!
//! # Example
//!
//! ```ignore
//! use bookit_auth::{create_access_token, verify_token};
//! use bookit_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let issued = create_access_token(user_id, "user@example.com", &config)?;
//! let claims = verify_token(&issued.token, &config)?;
//! assert_eq!(claims.jti, issued.claims.jti);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{IssuedToken, create_access_token, verify_token};
