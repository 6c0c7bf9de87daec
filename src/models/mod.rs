//! # Data Models
//!
//! This module contains all the SeaORM entity models used throughout the
//! Assetdesk API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod asset;
pub mod asset_type;
pub mod assignment_history;
pub mod employee;
pub mod team;

pub use asset::Entity as Asset;
pub use asset_type::Entity as AssetType;
pub use assignment_history::Entity as AssignmentHistory;
pub use employee::Entity as Employee;
pub use team::Entity as Team;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "assetdesk".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
