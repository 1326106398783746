//! Opaque cursor and page envelope primitives shared by list endpoints.
//!
//! Cursors wrap the primary-key boundary of the last row a client has seen.
//! Callers never interpret them as sort criteria; they are decoded back into
//! a key and applied as an inclusive upper bound on a descending scan.
//!
//! ```
//! use pagination::{Cursor, Page};
//!
//! let cursor = Cursor::from_key(4_200);
//! let decoded = Cursor::decode(cursor.encoded()).expect("round trip");
//! assert_eq!(decoded.key(), 4_200);
//!
//! let page = Page::from_overfetched(vec![3_u64, 2, 1], 2, |key| *key);
//! assert_eq!(page.results(), &[3, 2]);
//! assert_eq!(page.next_cursor(), Cursor::from_key(1).encoded());
//! ```

mod cursor;
mod page;

pub use cursor::{Cursor, CursorError};
pub use page::{DEFAULT_PAGE_SIZE, Page};
