//! Page envelope and over-fetch assembly.

use serde::Serialize;

use crate::Cursor;

/// Number of items returned per page by list endpoints.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// One page of results plus the cursor for the page that follows.
///
/// Serialises as `{"nextCursor": "...", "results": [...]}`. An empty
/// `nextCursor` marks the end of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    next_cursor: String,
    results: Vec<T>,
}

impl<T> Page<T> {
    /// Build the final page of a listing.
    #[must_use]
    pub fn last(results: Vec<T>) -> Self {
        Self {
            next_cursor: String::new(),
            results,
        }
    }

    /// Assemble a page from rows fetched with a limit of `page_size + 1`.
    ///
    /// When more than `page_size` rows are present the row at `page_size` is
    /// dropped and its key becomes the next cursor; any further rows are
    /// discarded as well.
    pub fn from_overfetched<F>(mut rows: Vec<T>, page_size: usize, key_of: F) -> Self
    where
        F: FnOnce(&T) -> u64,
    {
        let Some(boundary) = rows.get(page_size) else {
            return Self::last(rows);
        };
        let next_cursor = Cursor::from_key(key_of(boundary)).into_encoded();
        rows.truncate(page_size);
        Self {
            next_cursor,
            results: rows,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Encoded cursor for the next page, empty at the end of the list.
    #[must_use]
    pub fn next_cursor(&self) -> &str {
        &self.next_cursor
    }
}
