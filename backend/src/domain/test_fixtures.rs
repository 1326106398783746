//! Record builders shared by domain and adapter unit tests.

use chrono::{DateTime, Utc};

use crate::domain::{Post, PostComment, PostSave, RecordId, UserId};

pub(crate) fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user ids are non-blank")
}

pub(crate) fn record_id(raw: i64) -> RecordId {
    RecordId::new(raw).expect("fixture ids are non-negative")
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

pub(crate) fn post(id: i64) -> Post {
    Post {
        id: record_id(id),
        created_at: epoch(),
        updated_at: epoch(),
        deleted_at: None,
        user_id: user("author"),
        title: format!("Post {id}"),
        slug: format!("post-{id}"),
        body: "body".to_owned(),
        tags: Vec::new(),
    }
}

pub(crate) fn comment(id: i64, post_id: i64) -> PostComment {
    PostComment {
        id: record_id(id),
        created_at: epoch(),
        updated_at: epoch(),
        deleted_at: None,
        user_id: user("commenter"),
        post_id: record_id(post_id),
        body: "nice".to_owned(),
    }
}

pub(crate) fn save(id: i64, post_id: i64, user_id: &str) -> PostSave {
    PostSave {
        id: record_id(id),
        created_at: epoch(),
        updated_at: epoch(),
        deleted_at: None,
        user_id: user(user_id),
        post_id: record_id(post_id),
    }
}
