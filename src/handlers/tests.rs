//! # Tests for Handlers
//!
//! This module contains unit tests for API handlers, exercised through the
//! full router so middleware and error mapping are covered as well.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::handlers::root;
use crate::models::ServiceInfo;
use crate::repositories::test_support::{seed_asset_type, seed_team, setup_test_db};
use crate::server::{AppState, create_app};

async fn test_app() -> Router {
    let db = setup_test_db().await;
    seed_team(&db, "Engineering").await;
    seed_asset_type(&db, "Laptop").await;

    // Default config has no operator tokens, so auth runs in open mode
    let state = AppState {
        db,
        config: Arc::new(AppConfig::default()),
    };
    create_app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &Router, uri: &str, body: Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_root_handler_returns_expected_service_info() {
    let axum::response::Json(service_info) = root().await;

    assert_eq!(service_info.service, "assetdesk");
    assert_eq!(service_info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_service_info_default() {
    let service_info = ServiceInfo::default();

    assert_eq!(service_info.service, "assetdesk");
    assert_eq!(service_info.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_healthz_reports_ok() {
    let app = test_app().await;

    let response = get(&app, "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_teams_and_asset_types_listing() {
    let app = test_app().await;

    let response = get(&app, "/api/v1/teams").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["name"], "Engineering");

    let response = get(&app, "/api/v1/asset-types").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["title"], "Laptop");
}

#[tokio::test]
async fn test_create_employee_returns_201_with_location() {
    let app = test_app().await;

    let teams = body_json(get(&app, "/api/v1/teams").await).await;
    let team_id = teams["data"][0]["id"].as_str().unwrap().to_string();

    let response = post_json(
        &app,
        "/api/v1/employees",
        json!({
            "name": "Ada Lovelace",
            "email": "Ada@Example.com",
            "phone_no": "14155550123",
            "team_id": team_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get("Location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body = body_json(response).await;

    assert_eq!(body["data"]["name"], "Ada Lovelace");
    // Emails are normalized to lowercase on write
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert!(body["meta"]["request_id"].as_str().is_some());
    assert_eq!(
        location,
        format!("/api/v1/employees/{}", body["data"]["id"].as_str().unwrap())
    );
}

#[tokio::test]
async fn test_create_employee_with_bad_email_returns_400() {
    let app = test_app().await;

    let teams = body_json(get(&app, "/api/v1/teams").await).await;
    let team_id = teams["data"][0]["id"].as_str().unwrap().to_string();

    let response = post_json(
        &app,
        "/api/v1/employees",
        json!({
            "name": "Ada Lovelace",
            "email": "not-an-email",
            "phone_no": "14155550123",
            "team_id": team_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_get_unknown_employee_returns_404() {
    let app = test_app().await;

    let response = get(&app, &format!("/api/v1/employees/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_list_employees_rejects_oversized_page() {
    let app = test_app().await;

    let response = get(&app, "/api/v1/employees?page=1&page_size=500").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_assign_and_return_through_the_api() {
    let app = test_app().await;

    let teams = body_json(get(&app, "/api/v1/teams").await).await;
    let team_id = teams["data"][0]["id"].as_str().unwrap().to_string();
    let types = body_json(get(&app, "/api/v1/asset-types").await).await;
    let type_id = types["data"][0]["id"].as_str().unwrap().to_string();

    let employee = body_json(
        post_json(
            &app,
            "/api/v1/employees",
            json!({
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "phone_no": "14155550100",
                "team_id": team_id,
            }),
        )
        .await,
    )
    .await;
    let employee_id = employee["data"]["id"].as_str().unwrap().to_string();

    let asset = body_json(
        post_json(
            &app,
            "/api/v1/assets",
            json!({
                "name": "ThinkPad X1",
                "description": "Loaner laptop",
                "type_id": type_id,
                "serial_no": "SN-001",
            }),
        )
        .await,
    )
    .await;
    let asset_id = asset["data"]["id"].as_str().unwrap().to_string();
    assert!(asset["data"]["current_assignee"].is_null());

    let response = post_json(
        &app,
        &format!("/api/v1/assets/{}/assign", asset_id),
        json!({ "new_assignee_id": employee_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["current_assignee"], employee_id.as_str());

    // A second assign without a return is rejected
    let response = post_json(
        &app,
        &format!("/api/v1/assets/{}/assign", asset_id),
        json!({ "new_assignee_id": employee_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_STATE");

    let response = post_json(
        &app,
        &format!("/api/v1/assets/{}/return", asset_id),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["current_assignee"].is_null());

    let history = body_json(get(&app, &format!("/api/v1/assets/{}/history", asset_id)).await).await;
    let entries = history["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["current_assignee"]["name"], "Grace Hopper");
    assert!(entries[1]["current_assignee"].is_null());
}

#[tokio::test]
async fn test_delete_employee_holding_asset_returns_409() {
    let app = test_app().await;

    let teams = body_json(get(&app, "/api/v1/teams").await).await;
    let team_id = teams["data"][0]["id"].as_str().unwrap().to_string();
    let types = body_json(get(&app, "/api/v1/asset-types").await).await;
    let type_id = types["data"][0]["id"].as_str().unwrap().to_string();

    let employee = body_json(
        post_json(
            &app,
            "/api/v1/employees",
            json!({
                "name": "Holder",
                "email": "holder@example.com",
                "phone_no": "14155550101",
                "team_id": team_id,
            }),
        )
        .await,
    )
    .await;
    let employee_id = employee["data"]["id"].as_str().unwrap().to_string();

    let asset = body_json(
        post_json(
            &app,
            "/api/v1/assets",
            json!({
                "name": "Monitor",
                "description": "27 inch",
                "type_id": type_id,
                "serial_no": "SN-002",
            }),
        )
        .await,
    )
    .await;
    let asset_id = asset["data"]["id"].as_str().unwrap().to_string();

    post_json(
        &app,
        &format!("/api/v1/assets/{}/assign", asset_id),
        json!({ "new_assignee_id": employee_id }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/employees/{}", employee_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["code"], "CONFLICT");
}
