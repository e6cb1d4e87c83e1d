//! The two fixed roles.
//!
//! Roles are seed data inserted by the initial migration; the API never
//! creates or deletes them. Their IDs are well known so code and tests can
//! refer to them without a lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Well-known role IDs (must match migration)
pub mod system_roles {
    use uuid::Uuid;

    pub const ADMIN: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000001);
    pub const USER: Uuid = Uuid::from_u128(0x00000000_0000_0000_0000_000000000002);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    Admin,
    User,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "admin",
            RoleName::User => "user",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            RoleName::Admin => system_roles::ADMIN,
            RoleName::User => system_roles::USER,
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(RoleName::Admin),
            "user" => Ok(RoleName::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_names() {
        assert_eq!("admin".parse::<RoleName>(), Ok(RoleName::Admin));
        assert_eq!("user".parse::<RoleName>(), Ok(RoleName::User));
        assert!("moderator".parse::<RoleName>().is_err());
        assert!("Admin".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_role_ids_are_distinct() {
        assert_ne!(RoleName::Admin.id(), RoleName::User.id());
        assert_eq!(RoleName::User.id(), system_roles::USER);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RoleName::Admin).unwrap(), r#""admin""#);
    }
}
