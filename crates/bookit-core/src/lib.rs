//! # Bookit Core
//!
//! Foundational types shared by every Bookit crate:
//!
//! - [`errors`]: the [`AppError`] type and its HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use bookit_core::{AppError, hash_password};
//!
//! let hash = hash_password("secret123")?;
//! let missing = AppError::not_found(anyhow::anyhow!("Booking not found."));
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, FieldErrors};
pub use password::{hash_password, verify_password};
