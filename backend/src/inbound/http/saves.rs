//! Save handlers and the `saves` child relation of posts.

use actix_web::HttpResponse;
use serde::Deserialize;

use super::ApiResult;
use super::dispatch::RouteRequest;
use super::validation::{FieldName, parse_json_body, require_record_id, require_user_id};
use crate::domain::NewPostSave;

const USER_ID: FieldName = FieldName::new("userId");
const POST_ID: FieldName = FieldName::new("postId");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSaveBody {
    user_id: Option<String>,
    post_id: Option<i64>,
}

/// `POST /post-saves`: 201 for a new save, 200 when an existing one is
/// returned or revived.
pub async fn create_save(request: RouteRequest) -> ApiResult<HttpResponse> {
    let payload: CreateSaveBody = parse_json_body(&request.body)?;
    let outcome = request
        .state
        .saves
        .create(NewPostSave {
            post_id: require_record_id(payload.post_id, POST_ID)?,
            user_id: require_user_id(payload.user_id, USER_ID)?,
        })
        .await?;
    let mut response = if outcome.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(outcome.save))
}

/// `DELETE /post-saves/{id}`: repeat deletes of the same save succeed.
pub async fn delete_save(request: RouteRequest) -> ApiResult<HttpResponse> {
    let id = request.params.require_id()?;
    let save = request.state.saves.get_any(id).await?;
    request.state.saves.delete(&save).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /posts/{id}/saves`
pub async fn list_post_saves(request: RouteRequest) -> ApiResult<HttpResponse> {
    let post_id = request.params.require_id()?;
    let saves = request.state.saves.list_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(saves))
}
