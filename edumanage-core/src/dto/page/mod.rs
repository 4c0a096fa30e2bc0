//! Pagination DTOs

use serde::{Deserialize, Serialize};

/// Fixed page size used by every paginated list
pub const PER_PAGE: u32 = 10;

/// Page selector taken from the query string. Pages start at 1.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageParams {
    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub page: Option<u32>,
}

impl PageParams {
    /// Requested page, clamped to at least 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Row offset of the first item on the page
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(PER_PAGE)
    }
}

/// One page of results plus the total number of matching rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub count: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Page<T> {
    /// Number of pages needed for `count` rows
    pub fn total_pages(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        let pages = (self.count.max(0) as u64).div_ceil(u64::from(self.per_page));
        pages as u32
    }
}
