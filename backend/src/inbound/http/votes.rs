//! Vote handlers: casting a vote and the vote child relations of posts.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use super::ApiResult;
use super::dispatch::RouteRequest;
use super::validation::{
    FieldName, parse_json_body, require_record_id, require_user_id, require_value,
};

const USER_ID: FieldName = FieldName::new("userId");
const POST_ID: FieldName = FieldName::new("postId");
const VALUE: FieldName = FieldName::new("value");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CastVoteBody {
    user_id: Option<String>,
    post_id: Option<i64>,
    value: Option<i64>,
}

#[derive(Debug, Serialize)]
struct VoteTotal {
    total: i64,
}

/// `POST /post-votes`: any non-negative value counts as `+1`, anything else
/// as `-1`. A repeat vote replaces the earlier one.
pub async fn cast_vote(request: RouteRequest) -> ApiResult<HttpResponse> {
    let payload: CastVoteBody = parse_json_body(&request.body)?;
    let vote = request
        .state
        .votes
        .cast(
            require_record_id(payload.post_id, POST_ID)?,
            require_user_id(payload.user_id, USER_ID)?,
            require_value(payload.value, VALUE)?,
        )
        .await?;
    Ok(HttpResponse::Created().json(vote))
}

/// `GET /posts/{id}/total-votes`
pub async fn post_vote_total(request: RouteRequest) -> ApiResult<HttpResponse> {
    let post_id = request.params.require_id()?;
    let total = request.state.votes.total_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(VoteTotal { total }))
}

/// `GET /posts/{id}/voted-users`
pub async fn post_voters(request: RouteRequest) -> ApiResult<HttpResponse> {
    let post_id = request.params.require_id()?;
    let voters = request.state.votes.voters_for_post(post_id).await?;
    Ok(HttpResponse::Ok().json(voters))
}
