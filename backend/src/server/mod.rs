//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use postms::Trace;
use postms::inbound::http::dispatch::{Dispatcher, dispatch};
use postms::inbound::http::health::{HealthState, live, ready};
use postms::inbound::http::resources::build_registry;
use postms::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    dispatcher: web::Data<Dispatcher>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        dispatcher,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(dispatcher)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .default_service(web::to(dispatch))
}

/// Construct the HTTP server.
///
/// The resource registry is built before binding, so a conflicting
/// registration stops startup.
///
/// # Errors
///
/// Registry conflicts and socket bind failures.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let registry = build_registry().map_err(std::io::Error::other)?;
    let dispatcher = web::Data::new(Dispatcher::new(registry));
    let http_state = build_http_state(&config);
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
        dispatcher,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
