//! Employee entity model
//!
//! This module contains the SeaORM entity model for the employees table.

use super::team::Entity as Team;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Employee entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique identifier for the employee (primary key, immutable)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Full name, non-empty
    pub name: String,

    /// Email address, unique across employees
    pub email: String,

    /// Phone number; digits only, stored as text
    pub phone_no: String,

    /// Team this employee belongs to
    pub team_id: Uuid,

    /// Active/inactive status flag
    pub is_active: bool,

    /// Timestamp when the employee was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the employee was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Team",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
}

impl Related<Team> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
