//! Router tests that never reach a live database.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use hearth_api::{AppState, create_router};
use hearth_shared::{JwtConfig, JwtService};
use http_body_util::BodyExt;
use rstest::rstest;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

fn jwt_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "router-test-secret".to_string(),
        access_token_expires_minutes: 15,
        refresh_token_expires_days: 7,
    })
}

fn app() -> Router {
    let state = AppState::new(DatabaseConnection::Disconnected, jwt_service());
    create_router(state, Duration::from_secs(5))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_database_down() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "down");
}

#[rstest]
#[case("/api/v1/funds")]
#[case("/api/v1/expenses")]
#[case("/api/v1/budget-years/active")]
#[case("/api/v1/dashboard/summary")]
#[tokio::test]
async fn test_protected_routes_require_token(#[case] uri: &str) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/tasks")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let token = jwt_service().generate_refresh_token(Uuid::new_v4()).unwrap();

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/debts")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_store_failure_is_opaque() {
    let token = jwt_service().generate_access_token(Uuid::new_v4()).unwrap();

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/v1/funds")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "database_error");
    assert_eq!(body["message"], "An internal error occurred");
}

#[rstest]
#[case(r#"{"email": "not-an-email", "password": "long-enough-pw", "name": "Ann"}"#)]
#[case(r#"{"email": "ann@example.com", "password": "short", "name": "Ann"}"#)]
#[case(r#"{"email": "ann@example.com", "password": "long-enough-pw", "name": ""}"#)]
#[case(r#"{"email": "ann@example.com""#)]
#[tokio::test]
async fn test_register_rejects_bad_payload(#[case] payload: &'static str) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_unknown_setting_key_rejected_before_store() {
    let token = jwt_service().generate_access_token(Uuid::new_v4()).unwrap();

    let response = app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/settings/favourite_colour")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"value": "blue"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
