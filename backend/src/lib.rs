//! REST backend for posts, comments, votes and saves.
//!
//! Requests flow from the [`inbound`] HTTP adapter, through a table-driven
//! resource dispatcher, into the [`domain`] services, which persist through
//! the [`outbound`] adapters.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
