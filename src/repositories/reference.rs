//! Read-mostly repository for the reference tables (teams and asset types).
//!
//! These tables are populated by the seed pass at startup and change rarely;
//! the API exposes them as unpaginated lists for form dropdowns.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::asset_type::{
    ActiveModel as AssetTypeActiveModel, Column as AssetTypeColumn, Entity as AssetType,
    Model as AssetTypeModel,
};
use crate::models::team::{
    ActiveModel as TeamActiveModel, Column as TeamColumn, Entity as Team, Model as TeamModel,
};

pub struct ReferenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReferenceRepository<'a> {
    /// Create a new ReferenceRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All teams, ordered by name
    pub async fn list_teams(&self) -> Result<Vec<TeamModel>, RepositoryError> {
        Team::find()
            .order_by_asc(TeamColumn::Name)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// All asset types, ordered by title
    pub async fn list_asset_types(&self) -> Result<Vec<AssetTypeModel>, RepositoryError> {
        AssetType::find()
            .order_by_asc(AssetTypeColumn::Title)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Insert a team if no team with that name exists yet; returns the
    /// existing or newly created row either way.
    pub async fn ensure_team(&self, name: &str) -> Result<TeamModel, RepositoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepositoryError::validation_error("Team name is required"));
        }

        if let Some(existing) = Team::find()
            .filter(TeamColumn::Name.eq(name))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
        {
            return Ok(existing);
        }

        TeamActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }

    /// Insert an asset type if no type with that title exists yet
    pub async fn ensure_asset_type(&self, title: &str) -> Result<AssetTypeModel, RepositoryError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(RepositoryError::validation_error(
                "Asset type title is required",
            ));
        }

        if let Some(existing) = AssetType::find()
            .filter(AssetTypeColumn::Title.eq(title))
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
        {
            return Ok(existing);
        }

        AssetTypeActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(self.db)
        .await
        .map_err(RepositoryError::database_error)
    }
}
