//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod issues;
pub mod schemas;
pub mod state;

pub use error::ApiResult;

/// Register the `/api` scope with the issue handlers.
///
/// Callers register [`state::HttpState`] as application data separately.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use issue_tracker::inbound::http::routes;
///
/// let _app = App::new().configure(routes);
/// ```
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
            .service(issues::list_issues)
            .service(issues::create_issue)
            .service(issues::update_issue)
            .service(issues::delete_issue),
    );
}
