//! # Repositories
//!
//! This module contains repository implementations providing data access
//! for the Assetdesk API entities.

pub mod asset;
pub mod assignment;
pub mod employee;
pub mod reference;

pub use asset::{AssetRepository, CreateAssetRequest, UpdateAssetRequest};
pub use assignment::{AssignmentService, AssigneeSummary, HistoryEntry};
pub use employee::{CreateEmployeeRequest, EmployeeRepository, UpdateEmployeeRequest};
pub use reference::ReferenceRepository;

use crate::error::RepositoryError;

/// Maximum page size accepted by list endpoints.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Validated page/page_size pair for list queries (page is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// Build a page request, rejecting out-of-range parameters.
    pub fn new(page: u64, page_size: u64) -> Result<Self, RepositoryError> {
        if page < 1 {
            return Err(RepositoryError::validation_error("page must be at least 1"));
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(RepositoryError::validation_error(format!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(Self { page, page_size })
    }

    /// Zero-based page index for the paginator.
    pub fn zero_based(&self) -> u64 {
        self.page - 1
    }
}

/// One page of records plus paging metadata.
///
/// `total_pages` is ceil(total_items / page_size), matching what paging
/// clients render as "Page x of y".
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_bounds() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, MAX_PAGE_SIZE + 1).is_err());

        let req = PageRequest::new(3, 25).unwrap();
        assert_eq!(req.zero_based(), 2);
    }
}
