//! # Assets API Handlers
//!
//! CRUD endpoints for the asset catalog. Assignment state is never written
//! here; the assign/return/history endpoints live in the assignments module.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::OperatorAuth;
use crate::error::{ApiError, not_found};
use crate::handlers::types::{ApiResponse, PageQuery, PaginatedResponse};
use crate::models::asset::Model as AssetModel;
use crate::repositories::{AssetRepository, CreateAssetRequest, PageRequest, UpdateAssetRequest};
use crate::server::AppState;

/// Request payload for creating an asset
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAssetDto {
    /// Display name (required)
    #[schema(example = "MacBook Pro 14\"")]
    pub name: String,
    /// Free-form description
    #[schema(example = "Engineering laptop, 32GB RAM")]
    pub description: String,
    /// Asset type the asset belongs to
    pub type_id: Uuid,
    /// Manufacturer serial number, stored as an opaque string
    #[schema(example = "C02XJ0AAJGH5")]
    pub serial_no: String,
}

/// Request payload for updating an asset; omitted fields are unchanged.
/// The assignee pointer is deliberately absent; use the assign and return
/// endpoints to change custody.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAssetDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<Uuid>,
    pub serial_no: Option<String>,
    pub is_active: Option<bool>,
}

/// Asset representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub type_id: Uuid,
    pub serial_no: String,
    pub is_active: bool,
    /// Employee currently holding the asset, if any
    pub current_assignee: Option<Uuid>,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<AssetModel> for AssetDto {
    fn from(model: AssetModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            type_id: model.type_id,
            serial_no: model.serial_no,
            is_active: model.is_active,
            current_assignee: model.current_assignee,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// List assets with page-based pagination
#[utoipa::path(
    get,
    path = "/api/v1/assets",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated asset list", body = PaginatedResponse<AssetDto>),
        (status = 400, description = "Invalid pagination parameters", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assets"
)]
pub async fn list_assets(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedResponse<AssetDto>>, ApiError> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(20))?;
    let repo = AssetRepository::new(&state.db);
    let result = repo.list(page).await?;
    Ok(Json(PaginatedResponse::from_page(result, AssetDto::from)))
}

/// Create an asset; new assets always start unassigned
#[utoipa::path(
    post,
    path = "/api/v1/assets",
    security(("bearer_auth" = [])),
    request_body = CreateAssetDto,
    responses(
        (status = 201, description = "Asset created", body = ApiResponse<AssetDto>, headers(
            ("Location", description = "URL of the created asset")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset type not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assets"
)]
pub async fn create_asset(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Json(request): Json<CreateAssetDto>,
) -> Result<
    (
        StatusCode,
        [(&'static str, String); 1],
        Json<ApiResponse<AssetDto>>,
    ),
    ApiError,
> {
    let repo = AssetRepository::new(&state.db);
    let asset = repo
        .create(CreateAssetRequest {
            name: request.name,
            description: request.description,
            type_id: request.type_id,
            serial_no: request.serial_no,
        })
        .await?;

    let location = format!("/api/v1/assets/{}", asset.id);
    Ok((
        StatusCode::CREATED,
        [("Location", location)],
        Json(ApiResponse::new(AssetDto::from(asset))),
    ))
}

/// Get an asset by ID
#[utoipa::path(
    get,
    path = "/api/v1/assets/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Asset UUID")),
    responses(
        (status = 200, description = "Asset found", body = ApiResponse<AssetDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assets"
)]
pub async fn get_asset(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AssetDto>>, ApiError> {
    let repo = AssetRepository::new(&state.db);
    let asset = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found("Asset", &id.to_string()))?;
    Ok(Json(ApiResponse::new(AssetDto::from(asset))))
}

/// Update an asset; omitted fields keep their stored values
#[utoipa::path(
    put,
    path = "/api/v1/assets/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Asset UUID")),
    request_body = UpdateAssetDto,
    responses(
        (status = 200, description = "Asset updated", body = ApiResponse<AssetDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset or asset type not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assets"
)]
pub async fn update_asset(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAssetDto>,
) -> Result<Json<ApiResponse<AssetDto>>, ApiError> {
    let repo = AssetRepository::new(&state.db);
    let asset = repo
        .update(
            id,
            UpdateAssetRequest {
                name: request.name,
                description: request.description,
                type_id: request.type_id,
                serial_no: request.serial_no,
                is_active: request.is_active,
            },
        )
        .await?;
    Ok(Json(ApiResponse::new(AssetDto::from(asset))))
}

/// Delete an asset along with its assignment history
#[utoipa::path(
    delete,
    path = "/api/v1/assets/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Asset UUID")),
    responses(
        (status = 204, description = "Asset deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Asset not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "assets"
)]
pub async fn delete_asset(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = AssetRepository::new(&state.db);
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
