//! Pagination query parameters and response metadata.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use super::link::LinkResponse;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 32;
pub const MAX_PER_PAGE: u32 = 1000;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Applies defaults and validates bounds.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `per_page`: 32
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 1000
    ///
    /// # Returns
    ///
    /// `(page, per_page)` ready for the link service.
    pub fn validate_and_get_page(&self) -> Result<(i64, i64), String> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(format!("Page size must be between 1 and {}", MAX_PER_PAGE));
        }

        Ok((page as i64, per_page as i64))
    }
}

/// Page position and totals echoed with every listing.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: i64,
    pub per_page: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, per_page: i64, total_items: i64) -> Self {
        Self {
            page,
            per_page,
            total_items,
            total_pages: (total_items + per_page - 1) / per_page,
        }
    }
}

/// Response of `GET /links`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<u32>, per_page: Option<u32>) -> PaginationParams {
        PaginationParams { page, per_page }
    }

    #[test]
    fn test_defaults() {
        let (page, per_page) = params(None, None).validate_and_get_page().unwrap();
        assert_eq!(page, 1);
        assert_eq!(per_page, 32);
    }

    #[test]
    fn test_page_zero_is_error() {
        assert!(params(Some(0), None).validate_and_get_page().is_err());
    }

    #[test]
    fn test_per_page_bounds() {
        assert!(params(None, Some(0)).validate_and_get_page().is_err());
        assert!(params(None, Some(1)).validate_and_get_page().is_ok());
        assert!(params(None, Some(1000)).validate_and_get_page().is_ok());
        assert!(params(None, Some(1001)).validate_and_get_page().is_err());
    }

    #[test]
    fn test_parses_from_query_string_values() {
        let p: PaginationParams =
            serde_json::from_str(r#"{"page": "2", "per_page": "10"}"#).unwrap();
        assert_eq!(p.validate_and_get_page().unwrap(), (2, 10));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(PaginationMeta::new(1, 32, 33).total_pages, 2);
        assert_eq!(PaginationMeta::new(1, 32, 32).total_pages, 1);
        assert_eq!(PaginationMeta::new(1, 32, 0).total_pages, 0);
    }
}
