use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bookit::router::init_router;
use bookit::state::AppState;
use bookit_auth::create_access_token;
use bookit_config::{CorsConfig, JwtConfig};
use bookit_core::hash_password;
use bookit_models::RoleName;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        ttl_minutes: 60,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig::from_list("http://localhost:3000"),
    );
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_username() -> String {
    format!("user_{}", &Uuid::new_v4().simple().to_string()[..12])
}

/// Inserts a user directly and grants each of `roles`.
pub async fn create_test_user(pool: &PgPool, password: &str, roles: &[RoleName]) -> TestUser {
    let hashed = hash_password(password).unwrap();
    let username = generate_unique_username();
    let email = generate_unique_email();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, username, email, password)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind("Test User")
    .bind(&username)
    .bind(&email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    for role in roles {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(id)
            .bind(role.id())
            .execute(pool)
            .await
            .unwrap();
    }

    TestUser {
        id,
        username,
        email,
        password: password.to_string(),
    }
}

/// A valid bearer token for `user`, signed with the test secret.
pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id, &user.email, &test_jwt_config())
        .unwrap()
        .token
}

/// Sends one request and returns the status with the body parsed as JSON.
/// Non-JSON bodies come back as a JSON string.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

    (status, body)
}
