//! Shared HTTP adapter state.
//!
//! Handlers receive this through the dispatcher so they only depend on domain
//! services and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CommentRepository, PostRepository, SaveRepository, VoteRepository};
use crate::domain::{CommentService, PostService, SaveService, VoteService};

/// Parameter object bundling the repository ports behind the HTTP services.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Post storage.
    pub posts: Arc<dyn PostRepository>,
    /// Comment storage.
    pub comments: Arc<dyn CommentRepository>,
    /// Vote storage.
    pub votes: Arc<dyn VoteRepository>,
    /// Save storage.
    pub saves: Arc<dyn SaveRepository>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Post use-cases.
    pub posts: Arc<PostService>,
    /// Comment use-cases.
    pub comments: Arc<CommentService>,
    /// Vote use-cases.
    pub votes: Arc<VoteService>,
    /// Save use-cases.
    pub saves: Arc<SaveService>,
}

impl HttpState {
    /// Wire the domain services over the given ports.
    #[must_use]
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            posts,
            comments,
            votes,
            saves,
        } = ports;
        Self {
            posts: Arc::new(PostService::new(Arc::clone(&posts))),
            comments: Arc::new(CommentService::new(comments, posts)),
            votes: Arc::new(VoteService::new(votes)),
            saves: Arc::new(SaveService::new(saves)),
        }
    }
}
