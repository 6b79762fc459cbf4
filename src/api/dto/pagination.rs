//! Pagination and search query parameters for link listing.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Query parameters for `GET /links`.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,

    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery {
    /// Validates pagination parameters.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: 10
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Limit must be between 1 and 100
    ///
    /// # Returns
    ///
    /// `(page, limit)` as database-friendly integers.
    pub fn validate_page_and_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(10);

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=100).contains(&limit) {
            return Err("Limit must be between 1 and 100".to_string());
        }

        Ok((page as i64, limit as i64))
    }

    /// Returns the search needle, with blank input treated as no filter.
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
