//! # Asset Repository
//!
//! This module contains the repository implementation for Asset entities.
//! The current_assignee pointer is deliberately out of reach here; it is
//! written only by the assignment service.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::asset::{
    ActiveModel as AssetActiveModel, Column, Entity as Asset, Model as AssetModel,
};
use crate::models::asset_type::Entity as AssetType;
use crate::models::assignment_history::{Column as HistoryColumn, Entity as History};
use crate::repositories::{Page, PageRequest};

/// Request data for creating a new asset
#[derive(Debug, Clone)]
pub struct CreateAssetRequest {
    pub name: String,
    pub description: String,
    pub type_id: Uuid,
    pub serial_no: String,
}

/// Request data for updating an asset; `None` fields keep their stored
/// values. The assignee pointer cannot be set through updates.
#[derive(Debug, Clone, Default)]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<Uuid>,
    pub serial_no: Option<String>,
    pub is_active: Option<bool>,
}

/// Repository for Asset database operations
pub struct AssetRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AssetRepository<'a> {
    /// Create a new AssetRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new asset; always starts unassigned
    pub async fn create(&self, request: CreateAssetRequest) -> Result<AssetModel, RepositoryError> {
        validate_name(&request.name)?;
        validate_serial_no(&request.serial_no)?;
        self.ensure_type_exists(request.type_id).await?;

        let now = Utc::now();
        let asset = AssetActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name.trim().to_string()),
            description: Set(request.description),
            type_id: Set(request.type_id),
            serial_no: Set(request.serial_no),
            is_active: Set(true),
            current_assignee: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = asset
            .insert(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(result)
    }

    /// Get asset by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<AssetModel>, RepositoryError> {
        let asset = Asset::find_by_id(id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(asset)
    }

    /// List assets with deterministic ordering across pages
    pub async fn list(&self, page: PageRequest) -> Result<Page<AssetModel>, RepositoryError> {
        let paginator = Asset::find()
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

    /// Update an asset; fields absent from the request are left unchanged
    /// and the assignee pointer is never touched.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAssetRequest,
    ) -> Result<AssetModel, RepositoryError> {
        let asset = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Asset not found"))?;

        let mut active = asset.into_active_model();

        if let Some(name) = request.name {
            validate_name(&name)?;
            active.name = Set(name.trim().to_string());
        }
        if let Some(description) = request.description {
            active.description = Set(description);
        }
        if let Some(type_id) = request.type_id {
            self.ensure_type_exists(type_id).await?;
            active.type_id = Set(type_id);
        }
        if let Some(serial_no) = request.serial_no {
            validate_serial_no(&serial_no)?;
            active.serial_no = Set(serial_no);
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

    /// Delete an asset along with its assignment history.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let asset = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Asset not found"))?;

        // History rows go first; not every backend enforces the FK cascade.
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        History::delete_many()
            .filter(HistoryColumn::AssetId.eq(id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        Asset::delete_by_id(asset.id)
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        Ok(())
    }

    async fn ensure_type_exists(&self, type_id: Uuid) -> Result<(), RepositoryError> {
        AssetType::find_by_id(type_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("Asset type not found"))?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), RepositoryError> {
    if name.trim().is_empty() {
        return Err(RepositoryError::validation_error(
            "Asset name cannot be empty",
        ));
    }
    if name.len() > 255 {
        return Err(RepositoryError::validation_error(
            "Asset name cannot exceed 255 characters",
        ));
    }
    Ok(())
}

// Serial numbers are opaque tokens, not keys; only emptiness is rejected.
fn validate_serial_no(serial_no: &str) -> Result<(), RepositoryError> {
    if serial_no.trim().is_empty() {
        return Err(RepositoryError::validation_error(
            "Serial number cannot be empty",
        ));
    }
    Ok(())
}
