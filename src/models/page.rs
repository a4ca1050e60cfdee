//! Pagination types for list operations.

use serde::Serialize;

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page; must be greater than zero.
    pub size: usize,
}

impl PageRequest {
    pub const DEFAULT_SIZE: usize = 10;

    pub fn new(page: usize, size: usize) -> Self {
        Self { page, size }
    }

    /// Returns the number of rows to skip, saturating at `usize::MAX`.
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }
}

/// A page of results plus the total count across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = if request.size > 0 {
            total_elements.div_ceil(request.size as u64)
        } else {
            0
        };

        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
        }
    }

    /// Maps the page content to a different type.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
