mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;
use travel_planner::presentation::router;

#[tokio::test]
#[serial]
async fn test_health_endpoint() {
    let pool = setup_test_db_or_skip!();
    let app = router::app(common::create_test_app_state(pool)).unwrap();

    let response = app
        .oneshot(common::empty_request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[serial]
async fn test_auth_lifecycle_against_postgres() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;
    let app = router::app(common::create_test_app_state(pool.clone())).unwrap();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/register/",
            json!({
                "username": "marco",
                "email": "marco@example.com",
                "password": "wanderlust-2024"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let stored_hash: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE username = $1")
            .bind("marco")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(stored_hash.starts_with("$argon2id$"));

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/login/",
            json!({ "username": "marco", "password": "wanderlust-2024" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let access = body["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/authenticated/")
                .header(header::AUTHORIZATION, format!("Bearer {}", access))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/token/refresh/",
            json!({ "refresh_token": refresh }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    let rotated = body["data"]["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/token/refresh/",
            json!({ "refresh_token": refresh }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/logout/",
            json!({ "refresh_token": rotated }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    common::cleanup_test_db(&pool).await;
}
