use sqlx::{PgExecutor, PgPool};
use tracing::instrument;
use uuid::Uuid;

use bookit_core::{AppError, FieldErrors};
use bookit_models::User;

const USER_COLUMNS: &str = "id, name, username, email, phone, created_at, updated_at";

/// A user row including the password hash, used only for credential checks.
#[derive(Debug, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: Uuid,
    pub password: String,
}

/// Fields for a new user row. `password` is already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub password_hash: &'a str,
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }

    #[instrument(skip(db))]
    pub async fn find_credentials(
        db: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, password FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        Ok(credentials)
    }

    /// Users with the given ids, in no particular order.
    #[instrument(skip(db, ids), fields(count = ids.len()))]
    pub async fn find_many(db: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ANY($1)",
            USER_COLUMNS
        ))
        .bind(ids)
        .fetch_all(db)
        .await?;

        Ok(users)
    }

    /// Reports `username` and `email` values that already belong to a user.
    #[instrument(skip(db))]
    pub async fn uniqueness_errors(
        db: &PgPool,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<FieldErrors, AppError> {
        let mut fields = FieldErrors::new();

        if let Some(username) = username {
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                    .bind(username)
                    .fetch_one(db)
                    .await?;
            if taken {
                fields.insert(
                    "username".to_string(),
                    vec!["The username has already been taken.".to_string()],
                );
            }
        }

        if let Some(email) = email {
            let taken: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                    .bind(email)
                    .fetch_one(db)
                    .await?;
            if taken {
                fields.insert(
                    "email".to_string(),
                    vec!["The email has already been taken.".to_string()],
                );
            }
        }

        Ok(fields)
    }

    /// Inserts a user row. Pass a transaction to combine it with role
    /// assignment.
    #[instrument(skip(executor, new_user), fields(email = new_user.email))]
    pub async fn insert<'e, E>(executor: E, new_user: &NewUser<'_>) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, username, email, phone, password)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(new_user.name)
        .bind(new_user.username)
        .bind(new_user.email)
        .bind(new_user.phone)
        .bind(new_user.password_hash)
        .fetch_one(executor)
        .await
    }
}
