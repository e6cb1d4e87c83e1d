//! Administrative operations behind `bookit-cli`.

use sqlx::PgPool;

use bookit_core::{AppError, ErrorKind};
use bookit_models::{RegisterRequest, RoleName, User};

use crate::modules::auth::AuthService;
use crate::modules::roles::RoleService;
use crate::modules::users::UserService;

/// Creates a user holding the `admin` role, applying the same field and
/// uniqueness rules as registration.
pub async fn create_admin(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
    AuthService::register_with_role(db, &dto, RoleName::Admin).await
}

/// Grants `role` to the user with `email`. Granting a role twice is a no-op.
pub async fn assign_role(db: &PgPool, email: &str, role: RoleName) -> Result<User, AppError> {
    let user = UserService::find_by_email(db, email)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("No user with email {}", email)))?;

    RoleService::assign_role(db, user.id, role).await?;

    Ok(user)
}

/// Removes revocation records for tokens past their expiry.
pub async fn prune_tokens(db: &PgPool) -> Result<u64, AppError> {
    AuthService::prune_revoked_tokens(db).await
}

/// Renders an error for terminal output, listing field messages for
/// validation failures.
pub fn describe_error(err: &AppError) -> String {
    if err.kind != ErrorKind::ValidationFailed {
        return err.error.to_string();
    }

    err.fields
        .iter()
        .flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| format!("{}: {}", field, message))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
