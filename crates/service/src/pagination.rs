//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs,
//! plus the `Page` envelope returned by paginated listings.

use serde::Serialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Page size taken from configuration, capped to the `u32` range.
    pub fn sized(page: u32, per_page: u64) -> Self {
        Self { page, per_page: u32::try_from(per_page).unwrap_or(u32::MAX) }
    }

    /// Clamp to sane defaults and convert to `u64`, returning the 0-based
    /// page index and page size
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 10 } }
}

/// One page of results with the totals a paginator UI needs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: u64,
}

impl<T> Page<T> {
    /// `index` is the 0-based page index returned by [`Pagination::normalize`].
    pub fn new(data: Vec<T>, total: u64, index: u64, per_page: u64) -> Self {
        let last_page = total.div_ceil(per_page.max(1)).max(1);
        Self { data, total, per_page, current_page: index + 1, last_page }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
        }
    }

    pub fn has_more(&self) -> bool { self.current_page < self.last_page }
}
