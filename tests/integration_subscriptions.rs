#[allow(dead_code)]
mod common;

use axum::http::StatusCode;
use bookit_models::RoleName;
use common::{create_test_user, send, setup_test_app, token_for};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_any_authenticated_user_can_subscribe(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let admin = create_test_user(&pool, "secret123", &[RoleName::Admin]).await;
    let app = setup_test_app(pool);

    for caller in [&user, &admin] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/subscriptions",
            Some(&token_for(caller)),
            Some(json!({ "fromDate": "2025-01-01", "toDate": "2025-12-31" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Subscription created successfully.");
        assert_eq!(body["subscription"]["userId"], caller.id.to_string());
        assert_eq!(body["subscription"]["fromDate"], "2025-01-01");
        assert_eq!(body["subscription"]["toDate"], "2025-12-31");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subscription_to_date_must_follow_from_date(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let token = token_for(&user);
    let app = setup_test_app(pool.clone());

    for (from, to) in [("2025-06-01", "2025-06-01"), ("2025-06-01", "2025-01-01")] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/subscriptions",
            Some(&token),
            Some(json!({ "fromDate": from, "toDate": to })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"]["toDate"][0],
            "The to date field must be a date after from date."
        );
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subscription_missing_and_invalid_dates(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let token = token_for(&user);
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "POST", "/api/subscriptions", Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["fromDate"][0], "The from date field is required.");
    assert_eq!(body["errors"]["toDate"][0], "The to date field is required.");

    let (status, body) = send(
        &app,
        "POST",
        "/api/subscriptions",
        Some(&token),
        Some(json!({ "fromDate": "someday", "toDate": "2025-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["fromDate"][0],
        "The from date field must be a valid date."
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subscription_non_string_date_is_field_error(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/subscriptions",
        Some(&token_for(&user)),
        Some(json!({ "fromDate": 20250101, "toDate": "2025-02-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"]["fromDate"][0],
        "The from date field must be a valid date."
    );
    assert!(body["errors"].get("toDate").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subscription_accepts_timestamps(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/subscriptions",
        Some(&token_for(&user)),
        Some(json!({ "fromDate": "2025-01-01T08:00:00Z", "toDate": "2025-02-01 09:30:00" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["subscription"]["fromDate"], "2025-01-01");
    assert_eq!(body["subscription"]["toDate"], "2025-02-01");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_only_admin_lists_subscriptions(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/subscriptions/users",
        Some(&token_for(&user)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only admins can view all subscriptions.");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_lists_subscriptions_with_users(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let admin = create_test_user(&pool, "secret123", &[RoleName::Admin]).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/subscriptions",
        Some(&token_for(&user)),
        Some(json!({ "fromDate": "2025-01-01", "toDate": "2025-02-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "GET",
        "/api/subscriptions/users",
        Some(&token_for(&admin)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Subscriptions retrieved successfully.");
    let subscriptions = body["subscriptions"].as_array().unwrap();
    assert_eq!(subscriptions.len(), 1);
    assert_eq!(subscriptions[0]["userId"], user.id.to_string());
    assert_eq!(subscriptions[0]["user"]["email"], user.email);
    assert!(subscriptions[0]["user"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_subscription_list(pool: PgPool) {
    let admin = create_test_user(&pool, "secret123", &[RoleName::Admin]).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/subscriptions/users",
        Some(&token_for(&admin)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscriptions"], json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_subscriptions_keeps_order_within_one_transaction(pool: PgPool) {
    let user = create_test_user(&pool, "secret123", &[RoleName::User]).await;
    let admin = create_test_user(&pool, "secret123", &[RoleName::Admin]).await;

    let inserted: Vec<Uuid> = sqlx::query_scalar(
        "INSERT INTO subscriptions (from_date, to_date, user_id)
         SELECT DATE '2025-01-01' + n, DATE '2025-01-02' + n, $1
         FROM generate_series(0, 9) AS n
         RETURNING id",
    )
    .bind(user.id)
    .fetch_all(&pool)
    .await
    .unwrap();
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        "/api/subscriptions/users",
        Some(&token_for(&admin)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let listed_ids: Vec<String> = body["subscriptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    let inserted_ids: Vec<String> = inserted.iter().map(Uuid::to_string).collect();
    assert_eq!(listed_ids, inserted_ids);
}
