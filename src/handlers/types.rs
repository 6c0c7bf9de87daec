//! # Common API Types
//!
//! This module contains shared types used across multiple API handlers,
//! including the standard response envelope and pagination wrappers.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::repositories::Page;

/// Standard API response wrapper for single-resource operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response metadata
    pub meta: ResponseMeta,
}

/// Response metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseMeta {
    /// Unique request identifier for tracing
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub request_id: String,
    /// Response timestamp (ISO 8601)
    #[schema(example = "2024-01-15T10:30:00Z")]
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload with fresh metadata
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta {
                request_id: crate::telemetry::current_trace_id()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
                timestamp: Utc::now().to_rfc3339(),
            },
        }
    }
}

/// Query parameters for page-based list endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PageQuery {
    /// Page number, 1-based (default: 1)
    pub page: Option<u64>,
    /// Items per page (default: 20, max: 100)
    pub page_size: Option<u64>,
}

/// Generic paginated response wrapper for list endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// List of items for the current page
    pub data: Vec<T>,
    /// Pagination metadata
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// Current page number (1-based)
    pub page: u64,
    /// Items per page
    pub page_size: u64,
    /// Total number of items across all pages
    pub total_items: u64,
    /// Total number of pages
    pub total_pages: u64,
}

impl<T> PaginatedResponse<T> {
    /// Build a response from a repository page, mapping records to DTOs
    pub fn from_page<R>(page: Page<R>, map: impl Fn(R) -> T) -> Self {
        Self {
            data: page.records.into_iter().map(map).collect(),
            meta: PageMeta {
                page: page.page,
                page_size: page.page_size,
                total_items: page.total_items,
                total_pages: page.total_pages,
            },
        }
    }
}
