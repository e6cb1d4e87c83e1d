use sqlx::{PgExecutor, PgPool};
use tracing::instrument;
use uuid::Uuid;

use bookit_core::AppError;
use bookit_models::RoleName;

pub struct RoleService;

impl RoleService {
    /// Role names held by `user_id`, admin first.
    #[instrument(skip(db))]
    pub async fn roles_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<RoleName>, AppError> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT r.name FROM roles r
             JOIN user_roles ur ON ur.role_id = r.id
             WHERE ur.user_id = $1
             ORDER BY r.name",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(names
            .iter()
            .filter_map(|name| name.parse::<RoleName>().ok())
            .collect())
    }

    /// Grants `role` to `user_id`. Assigning a role the user already holds is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the role row is missing.
    #[instrument(skip(executor))]
    pub async fn assign_role<'e, E>(
        executor: E,
        user_id: Uuid,
        role: RoleName,
    ) -> Result<(), AppError>
    where
        E: PgExecutor<'e>,
    {
        let role_exists: bool = sqlx::query_scalar(
            "WITH role AS (SELECT id FROM roles WHERE name = $2),
             assigned AS (
                 INSERT INTO user_roles (user_id, role_id)
                 SELECT $1, id FROM role
                 ON CONFLICT (user_id, role_id) DO NOTHING
             )
             SELECT EXISTS(SELECT 1 FROM role)",
        )
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(executor)
        .await?;

        if !role_exists {
            return Err(AppError::internal_error(format!(
                "There is no role named `{}`.",
                role
            )));
        }

        Ok(())
    }
}
