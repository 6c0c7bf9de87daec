//! Reference data endpoints: teams and asset types.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::OperatorAuth;
use crate::error::ApiError;
use crate::handlers::types::ApiResponse;
use crate::models::asset_type::Model as AssetTypeModel;
use crate::models::team::Model as TeamModel;
use crate::repositories::ReferenceRepository;
use crate::server::AppState;

/// Team representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TeamDto {
    pub id: Uuid,
    #[schema(example = "Engineering")]
    pub name: String,
}

impl From<TeamModel> for TeamDto {
    fn from(model: TeamModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Asset type representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssetTypeDto {
    pub id: Uuid,
    #[schema(example = "Laptop")]
    pub title: String,
}

impl From<AssetTypeModel> for AssetTypeDto {
    fn from(model: AssetTypeModel) -> Self {
        Self {
            id: model.id,
            title: model.title,
        }
    }
}

/// List all teams, ordered by name
#[utoipa::path(
    get,
    path = "/api/v1/teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Team list", body = ApiResponse<Vec<TeamDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "reference"
)]
pub async fn list_teams(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
) -> Result<Json<ApiResponse<Vec<TeamDto>>>, ApiError> {
    let repo = ReferenceRepository::new(&state.db);
    let teams = repo.list_teams().await?;
    Ok(Json(ApiResponse::new(
        teams.into_iter().map(TeamDto::from).collect(),
    )))
}

/// List all asset types, ordered by title
#[utoipa::path(
    get,
    path = "/api/v1/asset-types",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Asset type list", body = ApiResponse<Vec<AssetTypeDto>>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "reference"
)]
pub async fn list_asset_types(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
) -> Result<Json<ApiResponse<Vec<AssetTypeDto>>>, ApiError> {
    let repo = ReferenceRepository::new(&state.db);
    let types = repo.list_asset_types().await?;
    Ok(Json(ApiResponse::new(
        types.into_iter().map(AssetTypeDto::from).collect(),
    )))
}
