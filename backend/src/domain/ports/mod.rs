//! Repository ports at the edge of the domain.
//!
//! Each trait exposes a `thiserror` enum so adapters map their failures into
//! predictable variants. Test builds also export the `mockall` doubles.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod post_repository;
mod save_repository;
mod vote_repository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use save_repository::MockSaveRepository;
pub use save_repository::{SaveRepository, SaveRepositoryError};
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{VoteRepository, VoteRepositoryError};
