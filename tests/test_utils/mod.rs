//! Test utilities for integration tests.
//!
//! Builds an in-memory SQLite database with migrations applied and an
//! application router wired against it, plus helpers for driving the router
//! with `tower::ServiceExt::oneshot` and decoding JSON bodies.

use std::sync::Arc;

use anyhow::Result;
use assetdesk::config::AppConfig;
use assetdesk::migration::{Migrator, MigratorTrait};
use assetdesk::server::{AppState, create_app};
use axum::{
    Router,
    body::Body,
    http::{Request, header},
    response::Response,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Builds the application router over a fresh test database
pub async fn build_test_app(config: AppConfig) -> Result<(Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let state = AppState {
        db: db.clone(),
        config: Arc::new(config),
    };
    Ok((create_app(state), db))
}

#[allow(dead_code)]
pub async fn create_test_team(db: &DatabaseConnection, name: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    assetdesk::models::team::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    Ok(id)
}

#[allow(dead_code)]
pub async fn create_test_asset_type(db: &DatabaseConnection, title: &str) -> Result<Uuid> {
    let id = Uuid::new_v4();
    assetdesk::models::asset_type::ActiveModel {
        id: Set(id),
        title: Set(title.to_string()),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await?;
    Ok(id)
}

#[allow(dead_code)]
pub async fn create_test_employee(
    db: &DatabaseConnection,
    team_id: Uuid,
    name: &str,
    email: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    assetdesk::models::employee::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        phone_no: Set("14155550199".to_string()),
        team_id: Set(team_id),
        is_active: Set(true),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await?;
    Ok(id)
}

#[allow(dead_code)]
pub async fn create_test_asset(
    db: &DatabaseConnection,
    type_id: Uuid,
    name: &str,
    serial_no: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();
    assetdesk::models::asset::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        description: Set(String::new()),
        type_id: Set(type_id),
        serial_no: Set(serial_no.to_string()),
        is_active: Set(true),
        current_assignee: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await?;
    Ok(id)
}

/// Sends a request with an optional bearer token and JSON body
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Decodes a response body as JSON
#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
