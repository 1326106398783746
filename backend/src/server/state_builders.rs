//! Builders wiring repository adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use postms::inbound::http::state::{HttpState, HttpStatePorts};
use postms::outbound::memory::InMemoryStore;
use postms::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselPostRepository, DieselSaveRepository,
    DieselVoteRepository,
};

use super::ServerConfig;

fn diesel_ports(pool: &DbPool) -> HttpStatePorts {
    HttpStatePorts {
        posts: Arc::new(DieselPostRepository::new(pool.clone())),
        comments: Arc::new(DieselCommentRepository::new(pool.clone())),
        votes: Arc::new(DieselVoteRepository::new(pool.clone())),
        saves: Arc::new(DieselSaveRepository::new(pool.clone())),
    }
}

fn memory_ports() -> HttpStatePorts {
    let store = Arc::new(InMemoryStore::new());
    HttpStatePorts {
        posts: store.clone(),
        comments: store.clone(),
        votes: store.clone(),
        saves: store,
    }
}

/// Build the HTTP state over PostgreSQL when a pool is configured, otherwise
/// over an in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => diesel_ports(pool),
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            memory_ports()
        }
    };
    web::Data::new(HttpState::new(ports))
}
