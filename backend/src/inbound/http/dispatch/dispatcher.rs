//! Method and path resolution.

use actix_web::http::Method;
use actix_web::web::{self, Bytes};
use actix_web::{HttpRequest, HttpResponse};
use tracing::debug;

use crate::domain::{Error, ErrorCode, RecordId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

use super::{ActionKey, Registry, RouteParams, RouteRequest};

/// A request resolved to one registry key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// Target resource name.
    pub resource: String,
    /// Action on the resource.
    pub action: ActionKey,
    /// Path parameters for the handler.
    pub params: RouteParams,
}

/// Routes requests through an immutable [`Registry`].
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Registry,
}

fn route_not_found() -> Error {
    Error::not_found(ErrorCode::NotFound.default_message())
}

impl Dispatcher {
    /// Dispatch over `registry`.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Translate a method and path into a route.
    ///
    /// Returns `None` for empty segments, unsupported segment counts,
    /// unsupported method and count pairs, and id segments that are not
    /// non-negative 64-bit integers. The registry is not consulted.
    #[must_use]
    pub fn resolve(method: &Method, path: &str) -> Option<ResolvedRoute> {
        let segments: Vec<&str> = path.strip_prefix('/')?.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return None;
        }
        let (resource, id, child) = match segments.as_slice() {
            [resource] => (*resource, None, None),
            [resource, id] => (*resource, Some(RecordId::parse_segment(id)?), None),
            [resource, id, child] => (
                *resource,
                Some(RecordId::parse_segment(id)?),
                Some((*child).to_owned()),
            ),
            _ => return None,
        };

        let action = match (method, id.is_some(), &child) {
            (&Method::POST, false, None) => ActionKey::Create,
            (&Method::GET, false, None) => ActionKey::List,
            (&Method::GET, true, None) => ActionKey::Detail,
            (&Method::PUT, true, None) => ActionKey::Update,
            (&Method::DELETE, true, None) => ActionKey::Delete,
            (&Method::GET, true, Some(name)) => ActionKey::child(name.as_str()),
            _ => return None,
        };

        Some(ResolvedRoute {
            resource: resource.to_owned(),
            action,
            params: RouteParams { id, child },
        })
    }

    /// Resolve and invoke the bound handler.
    ///
    /// # Errors
    ///
    /// A not-found error when the path does not resolve or nothing is bound,
    /// otherwise whatever the handler returns.
    pub async fn handle(
        &self,
        state: web::Data<HttpState>,
        method: &Method,
        path: &str,
        query: &str,
        body: Bytes,
    ) -> ApiResult<HttpResponse> {
        let Some(route) = Self::resolve(method, path) else {
            debug!(%method, path, "path does not match the route grammar");
            return Err(route_not_found());
        };
        let Some(handler) = self.registry.resolve(&route.resource, &route.action) else {
            debug!(resource = %route.resource, action = %route.action, "no handler registered");
            return Err(route_not_found());
        };
        debug!(resource = %route.resource, action = %route.action, "dispatching request");
        handler(RouteRequest {
            state,
            params: route.params,
            query: query.to_owned(),
            body,
        })
        .await
    }
}

/// Actix entry point, mounted as the application's default service.
pub async fn dispatch(
    req: HttpRequest,
    body: Bytes,
    dispatcher: web::Data<Dispatcher>,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    dispatcher
        .handle(state, req.method(), req.path(), req.query_string(), body)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn id(raw: i64) -> Option<RecordId> {
        Some(RecordId::new(raw).expect("valid id"))
    }

    #[rstest]
    #[case(Method::POST, "/posts", ActionKey::Create, None, None)]
    #[case(Method::GET, "/posts", ActionKey::List, None, None)]
    #[case(Method::GET, "/posts/5", ActionKey::Detail, id(5), None)]
    #[case(Method::PUT, "/posts/5", ActionKey::Update, id(5), None)]
    #[case(Method::DELETE, "/posts/0", ActionKey::Delete, id(0), None)]
    #[case(
        Method::GET,
        "/posts/5/comments",
        ActionKey::child("comments"),
        id(5),
        Some("comments")
    )]
    fn grammar_maps_to_actions(
        #[case] method: Method,
        #[case] path: &str,
        #[case] action: ActionKey,
        #[case] expected_id: Option<RecordId>,
        #[case] child: Option<&str>,
    ) {
        let route = Dispatcher::resolve(&method, path).expect("path resolves");
        assert_eq!(route.resource, "posts");
        assert_eq!(route.action, action);
        assert_eq!(route.params.id, expected_id);
        assert_eq!(route.params.child.as_deref(), child);
    }

    #[rstest]
    #[case(Method::GET, "")]
    #[case(Method::GET, "/")]
    #[case(Method::GET, "posts")]
    #[case(Method::GET, "/posts/")]
    #[case(Method::GET, "//posts")]
    #[case(Method::GET, "/posts/5/comments/7")]
    #[case(Method::GET, "/posts/abc")]
    #[case(Method::GET, "/posts/-1")]
    #[case(Method::GET, "/posts/+1")]
    #[case(Method::GET, "/posts/99999999999999999999")]
    #[case(Method::GET, "/posts/abc/comments")]
    #[case(Method::PUT, "/posts")]
    #[case(Method::DELETE, "/posts")]
    #[case(Method::POST, "/posts/5")]
    #[case(Method::PATCH, "/posts/5")]
    #[case(Method::POST, "/posts/5/comments")]
    #[case(Method::DELETE, "/posts/5/comments")]
    fn off_grammar_requests_do_not_resolve(#[case] method: Method, #[case] path: &str) {
        assert_eq!(Dispatcher::resolve(&method, path), None);
    }
}
