//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use issue_tracker::Trace;
use issue_tracker::domain::IssueService;
use issue_tracker::inbound::http::routes;
use issue_tracker::inbound::http::state::HttpState;
use issue_tracker::outbound::memory::InMemoryIssueRepository;

/// Wire the issue service to the in-memory store.
///
/// The store is created once per process and shared by every worker.
fn build_http_state() -> web::Data<HttpState> {
    let service = Arc::new(IssueService::new(
        Arc::new(InMemoryIssueRepository::new()),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(service.clone(), service))
}

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(http_state)
        .wrap(Trace)
        .configure(routes)
}

/// Construct an Actix HTTP server bound to the configured address.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state();
    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(config.bind_addr())?
        .run();

    Ok(server)
}
