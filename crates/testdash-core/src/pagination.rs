//! Pagination types for list operations.
//!
//! Lists are addressed by `skip`/`limit` rather than page numbers because
//! both values appear verbatim in list cache keys.

use serde::{Deserialize, Serialize};

/// A request for a window of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of items to skip.
    pub skip: u64,
    /// Maximum number of items to return.
    pub limit: u64,
}

impl PageRequest {
    /// The default limit.
    pub const DEFAULT_LIMIT: u64 = 100;
    /// The maximum allowed limit.
    pub const MAX_LIMIT: u64 = 1000;

    /// Creates a new page request, clamping the limit to `MAX_LIMIT`.
    ///
    /// Clamping happens here so that two requests which fetch the same rows
    /// also share a cache key.
    #[must_use]
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.min(Self::MAX_LIMIT),
        }
    }

    /// Creates a page request for the first window with the default limit.
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.skip
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A window of results with the total count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this window.
    pub items: Vec<T>,
    /// The total number of items across all windows.
    pub total: u64,
    /// The skip used to fetch this window.
    pub skip: u64,
    /// The limit used to fetch this window.
    pub limit: u64,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            total,
            skip: request.skip,
            limit: request.limit,
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            skip: self.skip,
            limit: self.limit,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if more items exist past this window.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.skip + (self.items.len() as u64) < self.total
    }
}
