//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. All state sits behind one mutex, so each port call, including the
//! save insert-or-conflict check, is atomic.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, PostRepository, PostRepositoryError,
    SaveRepository, SaveRepositoryError, VoteRepository, VoteRepositoryError,
};
use crate::domain::{
    NewComment, NewPost, NewPostSave, NewVote, Post, PostComment, PostEdit, PostListQuery,
    PostSave, PostVote, RecordId, UserId,
};

/// Per-table identity sequence starting at 1.
#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn advance(&mut self) -> Option<RecordId> {
        self.0 = self.0.checked_add(1)?;
        RecordId::new(self.0).ok()
    }
}

#[derive(Debug, Default)]
struct State {
    post_ids: Sequence,
    comment_ids: Sequence,
    save_ids: Sequence,
    posts: BTreeMap<RecordId, Post>,
    comments: BTreeMap<RecordId, PostComment>,
    votes: BTreeMap<(RecordId, UserId), PostVote>,
    saves: BTreeMap<RecordId, PostSave>,
}

/// Thread-safe in-memory implementation of the repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut state = self.lock();
        let id = state
            .post_ids
            .advance()
            .ok_or_else(|| PostRepositoryError::query("id sequence exhausted"))?;
        let now = Utc::now();
        let stored = Post {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            user_id: post.user_id().clone(),
            title: post.title().to_owned(),
            slug: post.slug().to_owned(),
            body: post.body().to_owned(),
            tags: post.tags().to_vec(),
        };
        state.posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: RecordId,
        edit: &PostEdit,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut state = self.lock();
        let Some(post) = state
            .posts
            .get_mut(&id)
            .filter(|post| post.deleted_at.is_none())
        else {
            return Ok(None);
        };
        post.title = edit.title().to_owned();
        post.slug = edit.slug().to_owned();
        post.body = edit.body().to_owned();
        post.updated_at = Utc::now();
        Ok(Some(post.clone()))
    }

    async fn soft_delete(&self, id: RecordId) -> Result<(), PostRepositoryError> {
        if let Some(post) = self.lock().posts.get_mut(&id) {
            post.deleted_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Post>, PostRepositoryError> {
        Ok(self
            .lock()
            .posts
            .get(&id)
            .filter(|post| post.deleted_at.is_none())
            .cloned())
    }

    async fn list(&self, query: &PostListQuery) -> Result<Vec<Post>, PostRepositoryError> {
        Ok(self
            .lock()
            .posts
            .values()
            .rev()
            .filter(|post| query.matches(post))
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn distinct_tags(&self) -> Result<Vec<String>, PostRepositoryError> {
        let mut tags: Vec<String> = self
            .lock()
            .posts
            .values()
            .filter(|post| post.deleted_at.is_none())
            .flat_map(|post| post.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        Ok(tags)
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &NewComment) -> Result<PostComment, CommentRepositoryError> {
        let mut state = self.lock();
        let id = state
            .comment_ids
            .advance()
            .ok_or_else(|| CommentRepositoryError::query("id sequence exhausted"))?;
        let now = Utc::now();
        let stored = PostComment {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            user_id: comment.user_id.clone(),
            post_id: comment.post_id,
            body: comment.body.clone(),
        };
        state.comments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: RecordId,
        body: &str,
    ) -> Result<Option<PostComment>, CommentRepositoryError> {
        let mut state = self.lock();
        let Some(comment) = state
            .comments
            .get_mut(&id)
            .filter(|comment| comment.deleted_at.is_none())
        else {
            return Ok(None);
        };
        body.clone_into(&mut comment.body);
        comment.updated_at = Utc::now();
        Ok(Some(comment.clone()))
    }

    async fn soft_delete(&self, id: RecordId) -> Result<(), CommentRepositoryError> {
        if let Some(comment) = self.lock().comments.get_mut(&id) {
            comment.deleted_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: RecordId,
    ) -> Result<Option<PostComment>, CommentRepositoryError> {
        Ok(self
            .lock()
            .comments
            .get(&id)
            .filter(|comment| comment.deleted_at.is_none())
            .cloned())
    }

    async fn list_for_post(
        &self,
        post_id: RecordId,
    ) -> Result<Vec<PostComment>, CommentRepositoryError> {
        Ok(self
            .lock()
            .comments
            .values()
            .rev()
            .filter(|comment| comment.post_id == post_id && comment.deleted_at.is_none())
            .cloned()
            .collect())
    }
}

#[async_trait]
impl VoteRepository for InMemoryStore {
    async fn upsert(&self, vote: &NewVote) -> Result<PostVote, VoteRepositoryError> {
        let stored = PostVote {
            created_at: Utc::now(),
            user_id: vote.user_id().clone(),
            post_id: vote.post_id(),
            value: vote.value(),
        };
        self.lock()
            .votes
            .insert((vote.post_id(), vote.user_id().clone()), stored.clone());
        Ok(stored)
    }

    async fn total_for_post(&self, post_id: RecordId) -> Result<i64, VoteRepositoryError> {
        Ok(self
            .lock()
            .votes
            .values()
            .filter(|vote| vote.post_id == post_id)
            .map(|vote| i64::from(vote.value))
            .sum())
    }

    async fn voters_for_post(&self, post_id: RecordId) -> Result<Vec<UserId>, VoteRepositoryError> {
        // Keys sort by (post, user), so voters come out ordered and distinct.
        Ok(self
            .lock()
            .votes
            .keys()
            .filter(|(post, _)| *post == post_id)
            .map(|(_, user)| user.clone())
            .collect())
    }
}

#[async_trait]
impl SaveRepository for InMemoryStore {
    async fn insert_if_absent(
        &self,
        save: &NewPostSave,
    ) -> Result<Option<PostSave>, SaveRepositoryError> {
        let mut state = self.lock();
        let exists = state
            .saves
            .values()
            .any(|row| row.post_id == save.post_id && row.user_id == save.user_id);
        if exists {
            return Ok(None);
        }
        let id = state
            .save_ids
            .advance()
            .ok_or_else(|| SaveRepositoryError::query("id sequence exhausted"))?;
        let now = Utc::now();
        let stored = PostSave {
            id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            user_id: save.user_id.clone(),
            post_id: save.post_id,
        };
        state.saves.insert(id, stored.clone());
        Ok(Some(stored))
    }

    async fn revive(&self, save: &NewPostSave) -> Result<Option<PostSave>, SaveRepositoryError> {
        let mut state = self.lock();
        let Some(row) = state
            .saves
            .values_mut()
            .find(|row| row.post_id == save.post_id && row.user_id == save.user_id)
        else {
            return Ok(None);
        };
        if row.deleted_at.take().is_some() {
            row.updated_at = Utc::now();
        }
        Ok(Some(row.clone()))
    }

    async fn find_any_by_id(&self, id: RecordId) -> Result<Option<PostSave>, SaveRepositoryError> {
        Ok(self.lock().saves.get(&id).cloned())
    }

    async fn soft_delete(&self, id: RecordId) -> Result<(), SaveRepositoryError> {
        if let Some(row) = self.lock().saves.get_mut(&id) {
            row.deleted_at.get_or_insert_with(Utc::now);
        }
        Ok(())
    }

    async fn list_for_post(&self, post_id: RecordId) -> Result<Vec<PostSave>, SaveRepositoryError> {
        Ok(self
            .lock()
            .saves
            .values()
            .rev()
            .filter(|row| row.post_id == post_id && row.deleted_at.is_none())
            .cloned()
            .collect())
    }
}
