//! Diesel table definitions matching `backend/migrations`.
//!
//! Keep in step with the migrations by hand or via `diesel print-schema`.

diesel::table! {
    /// Posts. `deleted_at` marks a soft delete.
    posts (id) {
        id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
        user_id -> Text,
        title -> Text,
        slug -> Text,
        body -> Text,
        tags -> Array<Text>,
    }
}

diesel::table! {
    /// Comments on posts.
    post_comments (id) {
        id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
        user_id -> Text,
        post_id -> Int8,
        body -> Text,
    }
}

diesel::table! {
    /// One vote per `(post_id, user_id)`.
    post_votes (post_id, user_id) {
        post_id -> Int8,
        user_id -> Text,
        value -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saves, unique per `(post_id, user_id)` including deleted rows.
    post_saves (id) {
        id -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        deleted_at -> Nullable<Timestamptz>,
        user_id -> Text,
        post_id -> Int8,
    }
}

diesel::joinable!(post_comments -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(posts, post_comments, post_votes, post_saves);
