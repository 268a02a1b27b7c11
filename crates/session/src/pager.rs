//! Pagination state for the visible list.

use serde::{Deserialize, Serialize};

use outreach_core::error::CoreError;
use outreach_core::pagination::{clamp_page, paginate, total_pages, PageWindow, DEFAULT_PAGE_SIZE};

/// Page size and current page.
///
/// Every mutator takes the current visible length and leaves `page`
/// within `1..=max(1, total_pages)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page_size: usize,
    page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Result<Self, CoreError> {
        validate_page_size(page_size)?;
        Ok(Self { page_size, page: 1 })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to page 1 (after a filter change).
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Pull the page back inside the range for `visible_len` items.
    pub fn clamp(&mut self, visible_len: usize) {
        self.page = clamp_page(self.page, total_pages(visible_len, self.page_size));
    }

    pub fn set_page(&mut self, page: usize, visible_len: usize) {
        self.page = page;
        self.clamp(visible_len);
    }

    pub fn next(&mut self, visible_len: usize) {
        self.set_page(self.page.saturating_add(1), visible_len);
    }

    pub fn prev(&mut self, visible_len: usize) {
        self.set_page(self.page.saturating_sub(1), visible_len);
    }

    /// Change the page size, keeping the current page where possible.
    pub fn set_page_size(&mut self, page_size: usize, visible_len: usize) -> Result<(), CoreError> {
        validate_page_size(page_size)?;
        self.page_size = page_size;
        self.clamp(visible_len);
        Ok(())
    }

    /// The window of `items` for the current page.
    pub fn window<'a, T>(&self, items: &'a [T]) -> PageWindow<'a, T> {
        paginate(items, self.page_size, self.page)
    }
}

fn validate_page_size(page_size: usize) -> Result<(), CoreError> {
    if page_size == 0 {
        return Err(CoreError::Validation(
            "page size must be a positive integer".to_string(),
        ));
    }
    Ok(())
}
