//! Tag listing.

use actix_web::HttpResponse;

use super::ApiResult;
use super::dispatch::RouteRequest;

/// `GET /tags`: distinct tags of live posts, sorted.
pub async fn list_tags(request: RouteRequest) -> ApiResult<HttpResponse> {
    let tags = request.state.posts.tags().await?;
    Ok(HttpResponse::Ok().json(tags))
}
