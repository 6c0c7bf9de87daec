//! Database migrations for the Assetdesk API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_01_10_000001_create_teams;
mod m2025_01_10_000002_create_asset_types;
mod m2025_01_10_000003_create_employees;
mod m2025_01_10_000004_create_assets;
mod m2025_01_10_000005_create_assignment_history;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_01_10_000001_create_teams::Migration),
            Box::new(m2025_01_10_000002_create_asset_types::Migration),
            Box::new(m2025_01_10_000003_create_employees::Migration),
            Box::new(m2025_01_10_000004_create_assets::Migration),
            Box::new(m2025_01_10_000005_create_assignment_history::Migration),
        ]
    }
}
