//! AssignmentHistory entity model
//!
//! Append-only ledger of custody transitions. Rows are written inside the
//! same transaction that moves the asset's current_assignee pointer and are
//! never mutated afterwards.

use super::asset::Entity as Asset;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// One immutable custody transition for an asset
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assignment_history")]
pub struct Model {
    /// Unique identifier for the ledger entry (primary key, assigned at write time)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Asset this entry belongs to
    pub asset_id: Uuid,

    /// Holder before the transition (null when the asset was unassigned)
    pub previous_assignee: Option<Uuid>,

    /// Holder after the transition (null signifies a return)
    pub current_assignee: Option<Uuid>,

    /// When the transition happened
    pub assigned_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Asset",
        from = "Column::AssetId",
        to = "super::asset::Column::Id"
    )]
    Asset,
}

impl Related<Asset> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
