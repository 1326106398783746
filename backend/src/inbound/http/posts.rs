//! Post handlers: create, cursor-paginated list, detail, update, delete.

use actix_web::HttpResponse;
use serde::Deserialize;

use super::ApiResult;
use super::dispatch::RouteRequest;
use super::validation::{
    FieldName, invalid_field_error, parse_json_body, parse_query, require_text, require_user_id,
};
use crate::domain::{NewPost, PostEdit, PostListRequest, UserId};

const USER_ID: FieldName = FieldName::new("userId");
const TITLE: FieldName = FieldName::new("title");
const BODY: FieldName = FieldName::new("body");

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPostsQuery {
    cursor: Option<String>,
    user_id: Option<String>,
    tag: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostBody {
    user_id: Option<String>,
    title: Option<String>,
    body: Option<String>,
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct UpdatePostBody {
    title: Option<String>,
    body: Option<String>,
}

/// `POST /posts`
pub async fn create_post(request: RouteRequest) -> ApiResult<HttpResponse> {
    let payload: CreatePostBody = parse_json_body(&request.body)?;
    let draft = NewPost::new(
        require_user_id(payload.user_id, USER_ID)?,
        require_text(payload.title, TITLE)?,
        require_text(payload.body, BODY)?,
        payload.tags.unwrap_or_default(),
    );
    let post = request.state.posts.create(draft).await?;
    Ok(HttpResponse::Created().json(post))
}

/// `GET /posts?cursor=&userId=&tag=`
pub async fn list_posts(request: RouteRequest) -> ApiResult<HttpResponse> {
    let query: ListPostsQuery = parse_query(&request.query)?;
    let user_id = query
        .user_id
        .filter(|raw| !raw.is_empty())
        .map(UserId::new)
        .transpose()
        .map_err(|_| invalid_field_error(USER_ID, "must not be blank"))?;
    let page = request
        .state
        .posts
        .list(PostListRequest {
            cursor: query.cursor,
            user_id,
            tag: query.tag,
        })
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// `GET /posts/{id}`
pub async fn get_post(request: RouteRequest) -> ApiResult<HttpResponse> {
    let id = request.params.require_id()?;
    let post = request.state.posts.get(id).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// `PUT /posts/{id}`: replaces title and body; the slug follows the title.
pub async fn update_post(request: RouteRequest) -> ApiResult<HttpResponse> {
    let id = request.params.require_id()?;
    let payload: UpdatePostBody = parse_json_body(&request.body)?;
    let edit = PostEdit::new(
        require_text(payload.title, TITLE)?,
        require_text(payload.body, BODY)?,
    );
    let post = request.state.posts.update(id, edit).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// `DELETE /posts/{id}`
pub async fn delete_post(request: RouteRequest) -> ApiResult<HttpResponse> {
    let id = request.params.require_id()?;
    let post = request.state.posts.get(id).await?;
    request.state.posts.delete(&post).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{json_body, memory_state, route_request};
    use actix_web::http::StatusCode;
    use rstest::rstest;
    use serde_json::{Value, json};

    const DRAFT: &str =
        r#"{"userId":"u1","title":"Hello, World!","body":"first","tags":["Rust","rust","Web Dev"]}"#;

    #[rstest]
    #[actix_web::test]
    async fn create_derives_slug_and_tags() {
        let state = memory_state();
        let response = create_post(route_request(&state, None, "", DRAFT))
            .await
            .expect("create succeeds");

        let post: Value = json_body(response, StatusCode::CREATED).await;
        assert_eq!(post["id"], json!(1));
        assert_eq!(post["slug"], json!("hello-world"));
        assert_eq!(post["tags"], json!(["rust", "web-dev"]));
        assert_eq!(post["userId"], json!("u1"));
        assert!(post.get("deletedAt").is_none());
    }

    #[rstest]
    #[case(r#"{"title":"t","body":"b"}"#)]
    #[case(r#"{"userId":"u","title":"  ","body":"b"}"#)]
    #[case(r#"{"userId":"u","title":"t"}"#)]
    #[case("not json")]
    #[actix_web::test]
    async fn create_rejects_incomplete_bodies(#[case] body: &str) {
        let state = memory_state();
        let error = create_post(route_request(&state, None, "", body))
            .await
            .expect_err("body rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[actix_web::test]
    async fn update_replaces_title_body_and_slug_only() {
        let state = memory_state();
        create_post(route_request(&state, None, "", DRAFT))
            .await
            .expect("create succeeds");

        let response = update_post(route_request(
            &state,
            Some(1),
            "",
            r#"{"title":"Second Draft","body":"edited","userId":"ignored"}"#,
        ))
        .await
        .expect("update succeeds");

        let post: Value = json_body(response, StatusCode::OK).await;
        assert_eq!(post["title"], json!("Second Draft"));
        assert_eq!(post["slug"], json!("second-draft"));
        assert_eq!(post["body"], json!("edited"));
        assert_eq!(post["userId"], json!("u1"));
        assert_eq!(post["tags"], json!(["rust", "web-dev"]));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_of_missing_post_is_not_found() {
        let state = memory_state();
        let error = update_post(route_request(
            &state,
            Some(3),
            "",
            r#"{"title":"t","body":"b"}"#,
        ))
        .await
        .expect_err("missing post");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_then_get_is_not_found() {
        let state = memory_state();
        create_post(route_request(&state, None, "", DRAFT))
            .await
            .expect("create succeeds");

        let response = delete_post(route_request(&state, Some(1), "", ""))
            .await
            .expect("delete succeeds");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let fetched = get_post(route_request(&state, Some(1), "", ""))
            .await
            .expect_err("post is gone");
        assert_eq!(fetched.code(), ErrorCode::NotFound);
        let deleted_again = delete_post(route_request(&state, Some(1), "", ""))
            .await
            .expect_err("post is gone");
        assert_eq!(deleted_again.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_of_unset_id_is_not_found() {
        let state = memory_state();
        let error = delete_post(route_request(&state, Some(0), "", ""))
            .await
            .expect_err("id zero never exists");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_web::test]
    async fn list_applies_filters() {
        let state = memory_state();
        for body in [
            r#"{"userId":"ann","title":"a","body":"b","tags":["rust"]}"#,
            r#"{"userId":"bob","title":"a","body":"b","tags":["rust"]}"#,
            r#"{"userId":"ann","title":"a","body":"b","tags":["go"]}"#,
        ] {
            create_post(route_request(&state, None, "", body))
                .await
                .expect("create succeeds");
        }

        let response = list_posts(route_request(&state, None, "userId=ann&tag=rust", ""))
            .await
            .expect("list succeeds");
        let page: Value = json_body(response, StatusCode::OK).await;
        assert_eq!(page["nextCursor"], json!(""));
        let ids: Vec<&Value> = page["results"]
            .as_array()
            .expect("results array")
            .iter()
            .map(|post| &post["id"])
            .collect();
        assert_eq!(ids, vec![&json!(1)]);
    }

    #[rstest]
    #[case("cursor=***")]
    #[case("cursor=bm90LWEtbnVtYmVy")]
    #[actix_web::test]
    async fn list_rejects_foreign_cursors(#[case] query: &str) {
        let state = memory_state();
        let error = list_posts(route_request(&state, None, query, ""))
            .await
            .expect_err("cursor rejected");
        assert_eq!(error.code(), ErrorCode::CursorDecoding);
    }
}
