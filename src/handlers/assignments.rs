//! # Assignments API Handlers
//!
//! Assign, return, and history endpoints. These are the only routes that
//! change which employee holds an asset.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::handlers::assets::AssetDto;
use crate::handlers::types::ApiResponse;
use crate::repositories::{AssigneeSummary, AssignmentService, HistoryEntry};
use crate::server::AppState;

/// Request payload for assigning an asset
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignAssetDto {
    /// Employee to hand the asset to
    pub new_assignee_id: Uuid,
}

/// Employee reference inside a history entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssigneeDto {
    pub id: Uuid,
    /// Display name; null when the employee has since been deleted
    pub name: Option<String>,
}

impl From<AssigneeSummary> for AssigneeDto {
    fn from(summary: AssigneeSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
        }
    }
}

/// One custody transition in an asset's history
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntryDto {
    pub id: Uuid,
    pub asset_id: Uuid,
    /// Holder before this transition; null for an initial assignment
    pub previous_assignee: Option<AssigneeDto>,
    /// Holder after this transition; null for a return
    pub current_assignee: Option<AssigneeDto>,
    /// When the transition happened (ISO 8601)
    pub assigned_date: String,
}

impl From<HistoryEntry> for HistoryEntryDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            asset_id: entry.asset_id,
            previous_assignee: entry.previous_assignee.map(AssigneeDto::from),
            current_assignee: entry.current_assignee.map(AssigneeDto::from),
            assigned_date: entry.assigned_date.to_rfc3339(),
        }
    }
}

/// Assign an unassigned asset to an employee
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/assign",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Asset UUID")),
    request_body = AssignAssetDto,
    responses(
        (status = 200, description = "Asset assigned", body = ApiResponse<AssetDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset or employee not found", body = ApiError),
        (status = 409, description = "Concurrent assignment change", body = ApiError),
        (status = 422, description = "Asset is already assigned", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assignments"
)]
pub async fn assign_asset(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignAssetDto>,
) -> Result<Json<ApiResponse<AssetDto>>, ApiError> {
    let service = AssignmentService::new(&state.db);
    let asset = service.assign(id, request.new_assignee_id).await?;
    Ok(Json(ApiResponse::new(AssetDto::from(asset))))
}

/// Return an assigned asset, clearing its assignee
#[utoipa::path(
    post,
    path = "/api/v1/assets/{id}/return",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Asset UUID")),
    responses(
        (status = 200, description = "Asset returned", body = ApiResponse<AssetDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset not found", body = ApiError),
        (status = 409, description = "Concurrent assignment change", body = ApiError),
        (status = 422, description = "Asset is not currently assigned", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assignments"
)]
pub async fn return_asset(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AssetDto>>, ApiError> {
    let service = AssignmentService::new(&state.db);
    let asset = service.return_asset(id).await?;
    Ok(Json(ApiResponse::new(AssetDto::from(asset))))
}

/// Full assignment history for an asset, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}/history",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Asset UUID")),
    responses(
        (status = 200, description = "Assignment history", body = ApiResponse<Vec<HistoryEntryDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assignments"
)]
pub async fn asset_history(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<HistoryEntryDto>>>, ApiError> {
    let service = AssignmentService::new(&state.db);
    let entries = service.history(id).await?;
    Ok(Json(ApiResponse::new(
        entries.into_iter().map(HistoryEntryDto::from).collect(),
    )))
}
