//! Asset entity model
//!
//! The current_assignee column is one of the two views of the assignment
//! fact (the other being the latest ledger entry); only the assignment
//! service writes it.

use super::asset_type::Entity as AssetType;
use super::employee::Entity as Employee;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Asset entity representing a trackable piece of equipment
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    /// Unique identifier for the asset (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Display name, non-empty
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Asset type this asset is classified under
    pub type_id: Uuid,

    /// Serial number; opaque string token, not a key
    pub serial_no: String,

    /// Active/inactive status flag (distinct from assigned/unassigned)
    pub is_active: bool,

    /// Employee currently holding this asset, if any
    pub current_assignee: Option<Uuid>,

    /// Timestamp when the asset was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the asset was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "AssetType",
        from = "Column::TypeId",
        to = "super::asset_type::Column::Id"
    )]
    AssetType,
    #[sea_orm(
        belongs_to = "Employee",
        from = "Column::CurrentAssignee",
        to = "super::employee::Column::Id"
    )]
    Assignee,
}

impl Related<AssetType> for Entity {
    fn to() -> RelationDef {
        Relation::AssetType.def()
    }
}

impl Related<Employee> for Entity {
    fn to() -> RelationDef {
        Relation::Assignee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
