use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Page selection for paginated listings (`?page=&per_page=`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Build a pagination request. Both values are 1-based and must be non-zero.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `page` or `per_page` is zero.
    pub fn new(page: u32, per_page: u32) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::Validation("page must be at least 1".into()));
        }
        if per_page == 0 {
            return Err(CoreError::Validation("per_page must be at least 1".into()));
        }
        Ok(Self { page, per_page })
    }

    /// Render as a query string without the leading `?`.
    #[must_use]
    pub fn to_query(&self) -> String {
        format!("page={}&per_page={}", self.page, self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}
