//! PostgreSQL persistence adapters using Diesel.
//!
//! Repository implementations only translate between Diesel rows
//! (`models.rs`, `schema.rs`) and domain records; row types never leave this
//! module. Connections come from a bb8 pool through `diesel-async`, and every
//! database failure is mapped to the port's error enum.
//!
//! ```ignore
//! use postms::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/postms")).await?;
//! let posts = DieselPostRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_comment_repository;
mod diesel_post_repository;
mod diesel_save_repository;
mod diesel_vote_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_save_repository::DieselSaveRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use migrations::{ConnectRetry, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
