//! HTTP inbound adapter.
//!
//! Health probes are ordinary actix services; every other request goes
//! through the resource [`dispatch`] table built by
//! [`resources::build_registry`].

pub mod comments;
pub mod dispatch;
pub mod error;
pub mod health;
pub mod posts;
pub mod resources;
pub mod saves;
pub mod state;
pub mod tags;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod votes;

pub use error::ApiResult;
