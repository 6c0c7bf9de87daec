//! # Employee Repository
//!
//! This module contains the repository implementation for Employee entities,
//! providing validated CRUD operations and paginated listing.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::asset::{Column as AssetColumn, Entity as Asset};
use crate::models::employee::{
    ActiveModel as EmployeeActiveModel, Column, Entity as Employee, Model as EmployeeModel,
};
use crate::models::team::Entity as Team;
use crate::repositories::{Page, PageRequest};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Request data for creating a new employee
#[derive(Debug, Clone)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    pub phone_no: String,
    pub team_id: Uuid,
}

/// Request data for updating an employee; `None` fields keep their stored
/// values (partial update semantics).
#[derive(Debug, Clone, Default)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_no: Option<String>,
    pub team_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Repository for Employee database operations
pub struct EmployeeRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new EmployeeRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new employee
    pub async fn create(
        &self,
        request: CreateEmployeeRequest,
    ) -> Result<EmployeeModel, RepositoryError> {
        validate_name(&request.name)?;
        validate_email(&request.email)?;
        validate_phone(&request.phone_no)?;
        self.ensure_team_exists(request.team_id).await?;
        self.ensure_email_available(&request.email, None).await?;

        let now = Utc::now();
        let employee = EmployeeActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name.trim().to_string()),
            email: Set(request.email.trim().to_lowercase()),
            phone_no: Set(request.phone_no),
            team_id: Set(request.team_id),
            is_active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = employee
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Get employee by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<EmployeeModel>, RepositoryError> {
        let employee = Employee::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(employee)
    }

    /// List employees, ordered by creation time then id so that paging
    /// forward never skips or duplicates a record.
    pub async fn list(&self, page: PageRequest) -> Result<Page<EmployeeModel>, RepositoryError> {
        let paginator = Employee::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .paginate(self.db, page.page_size);

        let counts = paginator
            .num_items_and_pages()
            .await
            .map_err(RepositoryError::database_error)?;

        let records = paginator
            .fetch_page(page.zero_based())
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(Page {
            records,
            page: page.page,
            page_size: page.page_size,
            total_items: counts.number_of_items,
            total_pages: counts.number_of_pages,
        })
    }

    /// Update an employee; fields absent from the request are left unchanged.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEmployeeRequest,
    ) -> Result<EmployeeModel, RepositoryError> {
        let employee = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Employee not found"))?;

        let mut active = employee.into_active_model();

        if let Some(name) = request.name {
            validate_name(&name)?;
            active.name = Set(name.trim().to_string());
        }
        if let Some(email) = request.email {
            validate_email(&email)?;
            self.ensure_email_available(&email, Some(id)).await?;
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(phone_no) = request.phone_no {
            validate_phone(&phone_no)?;
            active.phone_no = Set(phone_no);
        }
        if let Some(team_id) = request.team_id {
            self.ensure_team_exists(team_id).await?;
            active.team_id = Set(team_id);
        }
        if let Some(is_active) = request.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        let result = active
            .update(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Delete an employee.
    ///
    /// Rejected while the employee is the current assignee of any asset:
    /// the held assets must be returned first so the ledger keeps its
    /// provenance chain intact.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let employee = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Employee not found"))?;

        let held_assets = Asset::find()
            .filter(AssetColumn::CurrentAssignee.eq(id))
            .count(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if held_assets > 0 {
            return Err(RepositoryError::conflict(format!(
                "Employee currently holds {} asset(s); return them before deleting",
                held_assets
            )));
        }

        use sea_orm::ModelTrait;
        employee
            .delete(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(())
    }

    async fn ensure_team_exists(&self, team_id: Uuid) -> Result<(), RepositoryError> {
        Team::find_by_id(team_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Team not found"))?;
        Ok(())
    }

    async fn ensure_email_available(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), RepositoryError> {
        let mut query = Employee::find().filter(Column::Email.eq(email.trim().to_lowercase()));
        if let Some(id) = exclude {
            query = query.filter(Column::Id.ne(id));
        }

        let existing = query
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if existing.is_some() {
            return Err(RepositoryError::conflict("Email address already in use"));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), RepositoryError> {
    if name.trim().is_empty() {
        return Err(RepositoryError::validation_error(
            "Employee name cannot be empty",
        ));
    }
    if name.len() > 255 {
        return Err(RepositoryError::validation_error(
            "Employee name cannot exceed 255 characters",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), RepositoryError> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(RepositoryError::validation_error(
            "Email address format is invalid",
        ));
    }
    Ok(())
}

fn validate_phone(phone_no: &str) -> Result<(), RepositoryError> {
    if phone_no.is_empty() || !phone_no.chars().all(|c| c.is_ascii_digit()) {
        return Err(RepositoryError::validation_error(
            "Phone number must contain digits only",
        ));
    }
    Ok(())
}
