//! Page arithmetic shared by the listing service and the list controller.

use serde::Serialize;

use crate::domain::types::TypeConstraintError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 10;
pub const MAX_ITEMS_PER_PAGE: u32 = 100;

/// Number of page buttons rendered around the current page.
pub const MAX_SHOWN_PAGES: u32 = 7;

/// Validated page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Builds a request, rejecting `page < 1` and limits outside `1..=MAX_ITEMS_PER_PAGE`.
    pub fn new(page: u32, limit: u32) -> Result<Self, TypeConstraintError> {
        if page < 1 {
            return Err(TypeConstraintError::InvalidPage(
                "page must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_ITEMS_PER_PAGE).contains(&limit) {
            return Err(TypeConstraintError::InvalidPage(format!(
                "limit must be between 1 and {MAX_ITEMS_PER_PAGE}"
            )));
        }
        Ok(Self { page, limit })
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records preceding this page in the sorted result set.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// `ceil(total_records / limit)`; zero when there is nothing to show.
pub fn total_pages(total_records: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total_records.div_ceil(u64::from(limit))
}

/// Sliding window of at most `max_shown` page numbers around `current_page`,
/// clamped to `1..=total_pages`.
pub fn page_window(total_pages: u64, current_page: u64, max_shown: u32) -> Vec<u64> {
    if total_pages == 0 || max_shown == 0 {
        return vec![];
    }

    let max_shown = u64::from(max_shown);
    let half = max_shown / 2;

    let latest_start = total_pages.saturating_sub(max_shown) + 1;
    let start = current_page.saturating_sub(half).clamp(1, latest_start);
    let end = (start + max_shown - 1).min(total_pages);

    (start..=end).collect()
}

/// One window of a filtered, sorted result set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub total_records: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_records: u64) -> Self {
        Self {
            items,
            page: request.page(),
            limit: request.limit(),
            total_pages: total_pages(total_records, request.limit()),
            total_records,
        }
    }
}
