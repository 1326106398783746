//! Diesel row structs. Internal to the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{IdValidationError, Post, PostComment, PostSave, PostVote, RecordId, UserId};

use super::schema::{post_comments, post_saves, post_votes, posts};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub user_id: String,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub user_id: &'a str,
    pub title: &'a str,
    pub slug: &'a str,
    pub body: &'a str,
    pub tags: &'a [String],
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostEditRow<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub body: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = IdValidationError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(row.id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            user_id: UserId::new(row.user_id)?,
            title: row.title,
            slug: row.slug,
            body: row.body,
            tags: row.tags,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub user_id: String,
    pub post_id: i64,
    pub body: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_comments)]
pub(crate) struct NewCommentRow<'a> {
    pub user_id: &'a str,
    pub post_id: i64,
    pub body: &'a str,
}

impl TryFrom<CommentRow> for PostComment {
    type Error = IdValidationError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(row.id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            user_id: UserId::new(row.user_id)?,
            post_id: RecordId::new(row.post_id)?,
            body: row.body,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VoteRow {
    pub post_id: i64,
    pub user_id: String,
    pub value: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_votes)]
pub(crate) struct NewVoteRow<'a> {
    pub post_id: i64,
    pub user_id: &'a str,
    pub value: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<VoteRow> for PostVote {
    type Error = IdValidationError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: row.created_at,
            user_id: UserId::new(row.user_id)?,
            post_id: RecordId::new(row.post_id)?,
            value: row.value,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = post_saves)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SaveRow {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub user_id: String,
    pub post_id: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = post_saves)]
pub(crate) struct NewSaveRow<'a> {
    pub user_id: &'a str,
    pub post_id: i64,
}

impl TryFrom<SaveRow> for PostSave {
    type Error = IdValidationError;

    fn try_from(row: SaveRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RecordId::new(row.id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
            user_id: UserId::new(row.user_id)?,
            post_id: RecordId::new(row.post_id)?,
        })
    }
}
