//! Integration tests for bearer authentication on the API surface

use assetdesk::config::AppConfig;
use axum::http::StatusCode;

mod test_utils;

use test_utils::{body_json, build_test_app, create_test_team, send};

fn secured_config() -> AppConfig {
    AppConfig {
        operator_tokens: vec!["integration-token".to_string()],
        ..Default::default()
    }
}

#[tokio::test]
async fn business_routes_require_a_token() {
    let (app, _db) = build_test_app(secured_config()).await.unwrap();

    for uri in [
        "/api/v1/employees",
        "/api/v1/assets",
        "/api/v1/teams",
        "/api/v1/asset-types",
    ] {
        let response = send(&app, "GET", uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "uri: {}", uri);

        let body = body_json(response).await;
        assert_eq!(body["code"], "UNAUTHORIZED");
        // The rejection must not leak any directory content
        assert!(body.get("data").is_none());
    }
}

#[tokio::test]
async fn root_and_health_are_open() {
    let (app, _db) = build_test_app(secured_config()).await.unwrap();

    let response = send(&app, "GET", "/", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/healthz", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn valid_token_grants_access() {
    let (app, db) = build_test_app(secured_config()).await.unwrap();
    create_test_team(&db, "Engineering").await.unwrap();

    let response = send(&app, "GET", "/api/v1/teams", Some("integration-token"), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Engineering");
}

#[tokio::test]
async fn wrong_token_is_rejected() {
    let (app, _db) = build_test_app(secured_config()).await.unwrap();

    let response = send(&app, "GET", "/api/v1/teams", Some("wrong-token"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn open_mode_serves_without_credentials() {
    let config = AppConfig {
        operator_tokens: vec![],
        ..Default::default()
    };
    let (app, _db) = build_test_app(config).await.unwrap();

    let response = send(&app, "GET", "/api/v1/teams", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
