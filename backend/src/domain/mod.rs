//! Domain entities, services and ports.
//!
//! Purpose: hold the post, comment, vote and save model together with the
//! use cases over it. Nothing here knows about HTTP or SQL; inbound adapters
//! call the services and outbound adapters implement [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure classification.
//! - RecordId / UserId: identifier newtypes.
//! - Post, PostComment, PostVote, PostSave: stored records.
//! - PostService, CommentService, VoteService, SaveService: use cases.

pub mod comment;
mod comment_service;
pub mod error;
pub mod ids;
pub mod ports;
pub mod post;
mod post_service;
pub mod save;
mod save_service;
pub mod slug;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod vote;
mod vote_service;

pub use self::comment::{NewComment, PostComment};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{IdValidationError, RecordId, UserId};
pub use self::post::{NewPost, Post, PostEdit, PostListQuery};
pub use self::post_service::{PostListRequest, PostService};
pub use self::save::{NewPostSave, PostSave, SaveOutcome};
pub use self::save_service::SaveService;
pub use self::slug::{normalize_tags, slugify};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vote::{NewVote, PostVote};
pub use self::vote_service::VoteService;
