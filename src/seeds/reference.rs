//! Reference data seeding
//!
//! Populates the teams and asset_types tables with a baseline set of rows so
//! a fresh deployment has something to assign against. Seeding is
//! idempotent; existing rows are left untouched.

use anyhow::Result;
use sea_orm::DatabaseConnection;

use crate::repositories::ReferenceRepository;

const DEFAULT_TEAMS: &[&str] = &["Engineering", "IT Support", "Operations", "Finance"];

const DEFAULT_ASSET_TYPES: &[&str] = &["Laptop", "Monitor", "Phone", "Keyboard", "Headset"];

/// Seeds the reference tables with default teams and asset types
pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<()> {
    let repo = ReferenceRepository::new(db);

    for name in DEFAULT_TEAMS {
        match repo.ensure_team(name).await {
            Ok(team) => {
                log::info!("Team '{}' ready (id: {})", team.name, team.id);
            }
            Err(e) => {
                log::error!("Failed to seed team '{}': {}", name, e);
                return Err(e.into());
            }
        }
    }

    for title in DEFAULT_ASSET_TYPES {
        match repo.ensure_asset_type(title).await {
            Ok(asset_type) => {
                log::info!(
                    "Asset type '{}' ready (id: {})",
                    asset_type.title,
                    asset_type.id
                );
            }
            Err(e) => {
                log::error!("Failed to seed asset type '{}': {}", title, e);
                return Err(e.into());
            }
        }
    }

    log::info!("Reference data seeding completed successfully");
    Ok(())
}
