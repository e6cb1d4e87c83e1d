use sqlx::{PgExecutor, PgPool};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use bookit_auth::{Claims, IssuedToken, create_access_token};
use bookit_config::JwtConfig;
use bookit_core::errors::collect_field_errors;
use bookit_core::{AppError, FieldErrors, hash_password, verify_password};
use bookit_models::{
    LoginRequest, MeResponse, MessageResponse, RegisterRequest, RoleName, TokenResponse, User,
};

use crate::middleware::auth::AuthUser;
use crate::modules::roles::RoleService;
use crate::modules::users::{NewUser, UserService};

const REGISTER_FAILED: &str = "An error occurred while registering the user.";
const LOGIN_FAILED: &str = "An error occurred while logging in.";
const LOGOUT_FAILED: &str = "An error occurred while logging out.";
const REFRESH_FAILED: &str = "An error occurred while refreshing the token.";

pub struct AuthService;

impl AuthService {
    /// Creates a user holding the `user` role and signs them in.
    ///
    /// The user row and its role are written in one transaction.
    #[instrument(skip(db, jwt_config, dto), fields(email = ?dto.email()))]
    pub async fn register(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: RegisterRequest,
    ) -> Result<TokenResponse, AppError> {
        let user = Self::register_with_role(db, &dto, RoleName::User)
            .await
            .map_err(|e| e.context(REGISTER_FAILED))?;

        let issued = create_access_token(user.id, &user.email, jwt_config)
            .map_err(|e| e.context(REGISTER_FAILED))?;

        Ok(token_response(issued, jwt_config, user))
    }

    /// Validates `dto` and creates the user with `role`.
    ///
    /// Field rules and username/email uniqueness are reported together as one
    /// `ValidationFailed` error.
    pub async fn register_with_role(
        db: &PgPool,
        dto: &RegisterRequest,
        role: RoleName,
    ) -> Result<User, AppError> {
        let mut fields = match dto.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => collect_field_errors(&errors),
        };

        let taken = UserService::uniqueness_errors(db, dto.username(), dto.email()).await?;
        for (field, messages) in taken {
            fields.entry(field).or_default().extend(messages);
        }

        if !fields.is_empty() {
            return Err(AppError::validation(fields));
        }

        let (Some(name), Some(username), Some(email), Some(password)) =
            (dto.name(), dto.username(), dto.email(), dto.password())
        else {
            return Err(AppError::internal_error(
                "Registration fields missing after validation".to_string(),
            ));
        };
        let phone = dto.phone();
        let password_hash = hash_password(password)?;

        Self::create_user_with_role(
            db,
            NewUser {
                name,
                username,
                email,
                phone,
                password_hash: &password_hash,
            },
            role,
        )
        .await
    }

    /// Inserts the user and grants `role`, committing only if both succeed.
    pub async fn create_user_with_role(
        db: &PgPool,
        new_user: NewUser<'_>,
        role: RoleName,
    ) -> Result<User, AppError> {
        let mut tx = db.begin().await?;

        let user = UserService::insert(&mut *tx, &new_user)
            .await
            .map_err(unique_violation_to_validation)?;

        RoleService::assign_role(&mut *tx, user.id, role).await?;

        tx.commit().await?;

        tracing::info!(user_id = %user.id, role = %role, "User registered");

        Ok(user)
    }

    #[instrument(skip(db, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<TokenResponse, AppError> {
        if dto.email.is_empty() || dto.password.is_empty() {
            return Err(AppError::invalid_credentials());
        }

        let credentials = UserService::find_credentials(db, &dto.email)
            .await
            .map_err(|e| e.context(LOGIN_FAILED))?
            .ok_or_else(AppError::invalid_credentials)?;

        let is_valid = verify_password(&dto.password, &credentials.password)
            .map_err(|e| e.context(LOGIN_FAILED))?;
        if !is_valid {
            return Err(AppError::invalid_credentials());
        }

        let user = UserService::find_by_id(db, credentials.id)
            .await
            .map_err(|e| e.context(LOGIN_FAILED))?
            .ok_or_else(AppError::invalid_credentials)?;

        let issued = create_access_token(user.id, &user.email, jwt_config)
            .map_err(|e| e.context(LOGIN_FAILED))?;

        Ok(token_response(issued, jwt_config, user))
    }

    /// Invalidates the caller's current token.
    #[instrument(skip(db, auth_user), fields(user_id = %auth_user.user.id))]
    pub async fn logout(db: &PgPool, auth_user: &AuthUser) -> Result<MessageResponse, AppError> {
        Self::revoke_token(db, &auth_user.claims)
            .await
            .map_err(|e| e.context(LOGOUT_FAILED))?;

        Ok(MessageResponse::new("Successfully logged out"))
    }

    /// Issues a new token and invalidates the one presented.
    #[instrument(skip(db, jwt_config, auth_user), fields(user_id = %auth_user.user.id))]
    pub async fn refresh(
        db: &PgPool,
        jwt_config: &JwtConfig,
        auth_user: &AuthUser,
    ) -> Result<TokenResponse, AppError> {
        let issued = create_access_token(auth_user.user.id, &auth_user.user.email, jwt_config)
            .map_err(|e| e.context(REFRESH_FAILED))?;

        Self::revoke_token(db, &auth_user.claims)
            .await
            .map_err(|e| e.context(REFRESH_FAILED))?;

        Ok(token_response(issued, jwt_config, auth_user.user.clone()))
    }

    pub fn current_user(auth_user: &AuthUser) -> MeResponse {
        MeResponse {
            user: auth_user.user.clone(),
            roles: auth_user.roles.clone(),
        }
    }

    #[instrument(skip(db))]
    pub async fn is_token_revoked(db: &PgPool, jti: Uuid) -> Result<bool, AppError> {
        let revoked: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE jti = $1)")
                .bind(jti)
                .fetch_one(db)
                .await?;

        Ok(revoked)
    }

    /// Records `claims.jti` as revoked until the token would have expired.
    #[instrument(skip(executor, claims), fields(jti = %claims.jti))]
    pub async fn revoke_token<'e, E>(executor: E, claims: &Claims) -> Result<(), AppError>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO revoked_tokens (jti, user_id, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (jti) DO NOTHING",
        )
        .bind(claims.token_id()?)
        .bind(claims.user_id()?)
        .bind(claims.expires_at())
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Deletes revocation records for tokens that have expired anyway.
    #[instrument(skip(db))]
    pub async fn prune_revoked_tokens(db: &PgPool) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(db)
            .await?;

        Ok(result.rows_affected())
    }
}

fn token_response(issued: IssuedToken, jwt_config: &JwtConfig, user: User) -> TokenResponse {
    TokenResponse::bearer(issued.token, jwt_config.ttl_seconds(), user)
}

/// A concurrent registration can pass the uniqueness pre-check and still hit
/// the unique index; report it the same way as the pre-check would.
fn unique_violation_to_validation(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        let field = match db_err.constraint() {
            Some(c) if c.contains("username") => "username",
            _ => "email",
        };
        let mut fields = FieldErrors::new();
        fields.insert(
            field.to_string(),
            vec![format!("The {} has already been taken.", field)],
        );
        return AppError::validation(fields);
    }
    AppError::from(err)
}
