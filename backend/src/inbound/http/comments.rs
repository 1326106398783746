//! Comment handlers, plus the `comments` child relation of posts.

use actix_web::HttpResponse;
use serde::Deserialize;

use super::ApiResult;
use super::dispatch::RouteRequest;
use super::validation::{
    FieldName, parse_json_body, require_record_id, require_text, require_user_id,
};
use crate::domain::NewComment;

const USER_ID: FieldName = FieldName::new("userId");
const POST_ID: FieldName = FieldName::new("postId");
const BODY: FieldName = FieldName::new("body");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommentBody {
    user_id: Option<String>,
    post_id: Option<i64>,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateCommentBody {
    body: Option<String>,
}

/// `POST /comments`
pub async fn create_comment(request: RouteRequest) -> ApiResult<HttpResponse> {
    let payload: CreateCommentBody = parse_json_body(&request.body)?;
    let comment = NewComment {
        user_id: require_user_id(payload.user_id, USER_ID)?,
        post_id: require_record_id(payload.post_id, POST_ID)?,
        body: require_text(payload.body, BODY)?,
    };
    let created = request.state.comments.create(comment).await?;
    Ok(HttpResponse::Created().json(created))
}

/// `GET /comments/{id}`
pub async fn get_comment(request: RouteRequest) -> ApiResult<HttpResponse> {
    let id = request.params.require_id()?;
    let comment = request.state.comments.get(id).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// `PUT /comments/{id}`: replaces the body only.
pub async fn update_comment(request: RouteRequest) -> ApiResult<HttpResponse> {
    let id = request.params.require_id()?;
    let payload: UpdateCommentBody = parse_json_body(&request.body)?;
    let body = require_text(payload.body, BODY)?;
    let comment = request.state.comments.update(id, &body).await?;
    Ok(HttpResponse::Ok().json(comment))
}

/// `DELETE /comments/{id}`
pub async fn delete_comment(request: RouteRequest) -> ApiResult<HttpResponse> {
    let id = request.params.require_id()?;
    let comment = request.state.comments.get(id).await?;
    request.state.comments.delete(&comment).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /posts/{id}/comments`
pub async fn list_post_comments(request: RouteRequest) -> ApiResult<HttpResponse> {
    let post_id = request.params.require_id()?;
    let comments = request.state.comments.list_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}
