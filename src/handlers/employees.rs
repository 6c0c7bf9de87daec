//! # Employees API Handlers
//!
//! CRUD endpoints for the employee directory.

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
use crate::models::employee::Model as EmployeeModel;
use crate::repositories::{
    CreateEmployeeRequest, EmployeeRepository, PageRequest, UpdateEmployeeRequest,
};
use crate::server::AppState;

/// Request payload for creating an employee
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEmployeeDto {
    /// Full name (required)
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    /// Email address, unique across the directory
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Phone number, digits only
    #[schema(example = "14155550123")]
    pub phone_no: String,
    /// Team the employee belongs to
    pub team_id: Uuid,
}

/// Request payload for updating an employee; omitted fields are unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEmployeeDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_no: Option<String>,
    pub team_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Employee representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_no: String,
    pub team_id: Uuid,
    pub is_active: bool,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<EmployeeModel> for EmployeeDto {
    fn from(model: EmployeeModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            phone_no: model.phone_no,
            team_id: model.team_id,
            is_active: model.is_active,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// List employees with page-based pagination
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = PaginatedResponse<EmployeeDto>),
        (status = 400, description = "Invalid pagination parameters", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn list_employees(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedResponse<EmployeeDto>>, ApiError> {
    let page = PageRequest::new(query.page.unwrap_or(1), query.page_size.unwrap_or(20))?;
    let repo = EmployeeRepository::new(&state.db);
    let result = repo.list(page).await?;
    Ok(Json(PaginatedResponse::from_page(result, EmployeeDto::from)))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeDto,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<EmployeeDto>, headers(
            ("Location", description = "URL of the created employee")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Team not found", body = ApiError),
        (status = 409, description = "Email already in use", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn create_employee(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Json(request): Json<CreateEmployeeDto>,
) -> Result<
    (
        StatusCode,
        [(&'static str, String); 1],
        Json<ApiResponse<EmployeeDto>>,
    ),
    ApiError,
> {
    let repo = EmployeeRepository::new(&state.db);
    let employee = repo
        .create(CreateEmployeeRequest {
            name: request.name,
            email: request.email,
            phone_no: request.phone_no,
            team_id: request.team_id,
        })
        .await?;

    let location = format!("/api/v1/employees/{}", employee.id);
    Ok((
        StatusCode::CREATED,
        [("Location", location)],
        Json(ApiResponse::new(EmployeeDto::from(employee))),
    ))
}

/// Get an employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee UUID")),
    responses(
        (status = 200, description = "Employee found", body = ApiResponse<EmployeeDto>),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Employee not found", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn get_employee(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let repo = EmployeeRepository::new(&state.db);
    let employee = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found("Employee", &id.to_string()))?;
    Ok(Json(ApiResponse::new(EmployeeDto::from(employee))))
}

/// Update an employee; omitted fields keep their stored values
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee UUID")),
    request_body = UpdateEmployeeDto,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<EmployeeDto>),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Employee or team not found", body = ApiError),
        (status = 409, description = "Email already in use", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn update_employee(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEmployeeDto>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let repo = EmployeeRepository::new(&state.db);
    let employee = repo
        .update(
            id,
            UpdateEmployeeRequest {
                name: request.name,
                email: request.email,
                phone_no: request.phone_no,
                team_id: request.team_id,
                is_active: request.is_active,
            },
        )
        .await?;
    Ok(Json(ApiResponse::new(EmployeeDto::from(employee))))
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee UUID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Employee not found", body = ApiError),
        (status = 409, description = "Employee still holds assets", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "employees"
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    _operator_auth: OperatorAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = EmployeeRepository::new(&state.db);
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
