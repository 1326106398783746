//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::to_bytes;
use actix_web::web::{self, Bytes};
use actix_web::{HttpResponse, http::StatusCode};
use serde::de::DeserializeOwned;

use super::dispatch::{RouteParams, RouteRequest};
use super::state::{HttpState, HttpStatePorts};
use crate::domain::RecordId;
use crate::outbound::memory::InMemoryStore;

/// HTTP state over a fresh in-memory store.
pub fn memory_state() -> web::Data<HttpState> {
    let store = Arc::new(InMemoryStore::new());
    web::Data::new(HttpState::new(HttpStatePorts {
        posts: store.clone(),
        comments: store.clone(),
        votes: store.clone(),
        saves: store,
    }))
}

/// Build a handler request by hand.
pub fn route_request(
    state: &web::Data<HttpState>,
    id: Option<i64>,
    query: &str,
    body: &str,
) -> RouteRequest {
    RouteRequest {
        state: state.clone(),
        params: RouteParams {
            id: id.map(|raw| RecordId::new(raw).expect("valid test id")),
            child: None,
        },
        query: query.to_owned(),
        body: Bytes::copy_from_slice(body.as_bytes()),
    }
}

/// Assert the status and decode the JSON body.
pub async fn json_body<T: DeserializeOwned>(response: HttpResponse, status: StatusCode) -> T {
    assert_eq!(response.status(), status);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
