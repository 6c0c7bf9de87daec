//! # Assetdesk API Library
//!
//! This library provides the core functionality for the Assetdesk service,
//! an administrative backend for tracking equipment, employees, and the
//! assignment relationship between them.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod server;
pub mod telemetry;
pub use migration;
