//! Table-driven resource dispatch.
//!
//! Every API request lands in [`dispatch`], which resolves the method and
//! path against the [`Registry`] and invokes the bound [`Handler`] with a
//! [`RouteRequest`]. Anything that does not resolve is a 404.

mod dispatcher;
mod registry;

use std::future::Future;
use std::sync::Arc;

use actix_web::HttpResponse;
use actix_web::web::{self, Bytes};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, ErrorCode, RecordId};

use super::ApiResult;
use super::state::HttpState;

pub use dispatcher::{Dispatcher, ResolvedRoute, dispatch};
pub use registry::{ActionKey, Registry, RegistryBuilder, RegistryError};

/// A registered request handler.
pub type Handler =
    Arc<dyn Fn(RouteRequest) -> LocalBoxFuture<'static, ApiResult<HttpResponse>> + Send + Sync>;

/// Wrap an async function as a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(RouteRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ApiResult<HttpResponse>> + 'static,
{
    Arc::new(move |request| Box::pin(f(request)))
}

/// Path parameters extracted by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    /// Record id for detail, update, delete and child actions.
    pub id: Option<RecordId>,
    /// Child relation name for child actions.
    pub child: Option<String>,
}

impl RouteParams {
    /// The record id, or 404 when the action carries none.
    ///
    /// # Errors
    ///
    /// Not found when no id segment was parsed.
    pub fn require_id(&self) -> ApiResult<RecordId> {
        self.id
            .ok_or_else(|| Error::not_found(ErrorCode::NotFound.default_message()))
    }
}

/// Everything a handler receives.
pub struct RouteRequest {
    /// Domain services.
    pub state: web::Data<HttpState>,
    /// Parsed path parameters.
    pub params: RouteParams,
    /// Raw query string without the leading `?`.
    pub query: String,
    /// Raw request body.
    pub body: Bytes,
}
