//! The service's resource table.

use tracing::info;

use super::comments::{
    create_comment, delete_comment, get_comment, list_post_comments, update_comment,
};
use super::dispatch::{ActionKey, Registry, RegistryBuilder, RegistryError, handler};
use super::posts::{create_post, delete_post, get_post, list_posts, update_post};
use super::saves::{create_save, delete_save, list_post_saves};
use super::tags::list_tags;
use super::votes::{cast_vote, post_vote_total, post_voters};

/// Register every resource action.
///
/// # Errors
///
/// [`RegistryError`] when two handlers claim the same resource and action.
pub fn build_registry() -> Result<Registry, RegistryError> {
    let mut builder = RegistryBuilder::new();
    builder
        .register("posts", ActionKey::Create, handler(create_post))?
        .register("posts", ActionKey::List, handler(list_posts))?
        .register("posts", ActionKey::Detail, handler(get_post))?
        .register("posts", ActionKey::Update, handler(update_post))?
        .register("posts", ActionKey::Delete, handler(delete_post))?
        .register(
            "posts",
            ActionKey::child("comments"),
            handler(list_post_comments),
        )?
        .register(
            "posts",
            ActionKey::child("total-votes"),
            handler(post_vote_total),
        )?
        .register("posts", ActionKey::child("voted-users"), handler(post_voters))?
        .register("posts", ActionKey::child("saves"), handler(list_post_saves))?;
    builder
        .register("comments", ActionKey::Create, handler(create_comment))?
        .register("comments", ActionKey::Detail, handler(get_comment))?
        .register("comments", ActionKey::Update, handler(update_comment))?
        .register("comments", ActionKey::Delete, handler(delete_comment))?;
    builder.register("post-votes", ActionKey::Create, handler(cast_vote))?;
    builder
        .register("post-saves", ActionKey::Create, handler(create_save))?
        .register("post-saves", ActionKey::Delete, handler(delete_save))?;
    builder.register("tags", ActionKey::List, handler(list_tags))?;

    let registry = builder.build();
    info!(routes = registry.len(), "resource registry built");
    Ok(registry)
}
