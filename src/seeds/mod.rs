//! Database seeding functionality
//!
//! This module provides functionality to seed the database with initial data.
//! It populates the reference tables (teams and asset types) when the
//! application starts.

pub mod reference;

pub use reference::seed_reference_data;
