//! Posts and the queries that list them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::slug::{normalize_tags, slugify};
use super::{RecordId, UserId};

/// A stored post.
///
/// `deleted_at` marks a soft delete and is never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-assigned identity.
    pub id: RecordId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>,
    /// Author.
    pub user_id: UserId,
    /// Title as submitted.
    pub title: String,
    /// Slug derived from the title.
    pub slug: String,
    /// Body text.
    pub body: String,
    /// Normalised tags.
    pub tags: Vec<String>,
}

/// A post ready to be inserted.
///
/// # Examples
/// ```
/// use postms::domain::{NewPost, UserId};
///
/// let user = UserId::new("u1").unwrap();
/// let post = NewPost::new(user, "Hello World", "body", ["Rust", "rust", "Web Dev"]);
/// assert_eq!(post.slug(), "hello-world");
/// assert_eq!(post.tags(), ["rust", "web-dev"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    user_id: UserId,
    title: String,
    slug: String,
    body: String,
    tags: Vec<String>,
}

impl NewPost {
    /// Build a draft, deriving its slug and normalising its tags.
    pub fn new<I, S>(
        user_id: UserId,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let title = title.into();
        Self {
            slug: slugify(&title),
            user_id,
            title,
            body: body.into(),
            tags: normalize_tags(tags),
        }
    }

    /// Author.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Derived slug.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Normalised tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Replacement title and body for an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEdit {
    title: String,
    slug: String,
    body: String,
}

impl PostEdit {
    /// Build an edit, re-deriving the slug from the new title.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            body: body.into(),
        }
    }

    /// New title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Slug derived from the new title.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// New body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Filters for one page of the post listing.
///
/// Rows are returned by descending id; `upper_bound` is inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostListQuery {
    /// Highest id to include.
    pub upper_bound: Option<RecordId>,
    /// Restrict to one author.
    pub user_id: Option<UserId>,
    /// Restrict to posts carrying this exact tag.
    pub tag: Option<String>,
    /// Maximum number of rows to fetch.
    pub limit: usize,
}

impl PostListQuery {
    /// Whether `post` passes every filter except the limit.
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        post.deleted_at.is_none()
            && self.upper_bound.is_none_or(|bound| post.id <= bound)
            && self
                .user_id
                .as_ref()
                .is_none_or(|user| &post.user_id == user)
            && self
                .tag
                .as_ref()
                .is_none_or(|tag| post.tags.iter().any(|candidate| candidate == tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn user(raw: &str) -> UserId {
        UserId::new(raw).expect("valid user id")
    }

    #[fixture]
    fn post() -> Post {
        let at = DateTime::<Utc>::UNIX_EPOCH;
        Post {
            id: RecordId::new(5).expect("valid id"),
            created_at: at,
            updated_at: at,
            deleted_at: None,
            user_id: user("u1"),
            title: "Hello".into(),
            slug: "hello".into(),
            body: "text".into(),
            tags: vec!["rust".into()],
        }
    }

    #[rstest]
    fn edit_rederives_slug() {
        let edit = PostEdit::new("New Title!", "b");
        assert_eq!(edit.slug(), "new-title");
    }

    #[rstest]
    fn serialisation_omits_deletion_marker(mut post: Post) {
        post.deleted_at = Some(DateTime::<Utc>::UNIX_EPOCH);
        let value = serde_json::to_value(&post).expect("post serialises");
        assert_eq!(value["userId"], json!("u1"));
        assert_eq!(value["tags"], json!(["rust"]));
        assert!(value.get("deletedAt").is_none());
        assert!(value.get("deleted_at").is_none());
    }

    #[rstest]
    #[case(None, None, None, true)]
    #[case(Some(5), None, None, true)]
    #[case(Some(4), None, None, false)]
    #[case(None, Some("u2"), None, false)]
    #[case(None, Some("u1"), Some("rust"), true)]
    #[case(None, None, Some("go"), false)]
    fn list_query_filters(
        post: Post,
        #[case] bound: Option<i64>,
        #[case] user_id: Option<&str>,
        #[case] tag: Option<&str>,
        #[case] expected: bool,
    ) {
        let query = PostListQuery {
            upper_bound: bound.map(|raw| RecordId::new(raw).expect("valid id")),
            user_id: user_id.map(user),
            tag: tag.map(str::to_owned),
            limit: 101,
        };
        assert_eq!(query.matches(&post), expected);
    }

    #[rstest]
    fn list_query_skips_deleted_posts(mut post: Post) {
        post.deleted_at = Some(DateTime::<Utc>::UNIX_EPOCH);
        let query = PostListQuery {
            upper_bound: None,
            user_id: None,
            tag: None,
            limit: 101,
        };
        assert!(!query.matches(&post));
    }
}
