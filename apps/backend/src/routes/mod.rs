use actix_web::web;

use crate::error::AppError;

pub mod auth;
pub mod health;
pub mod profile;

/// Register every route. Shared by `main.rs` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request("INVALID_JSON", format!("Invalid JSON body: {err}")).into()
    }));
    // Parser messages stay out of the response.
    cfg.app_data(web::PathConfig::default().error_handler(|_err, _req| {
        AppError::bad_request("INVALID_PATH", "Invalid path parameter").into()
    }));

    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Auth routes: /api/register, /api/login, /api/logout
    cfg.service(web::scope("/api").configure(|api| {
        auth::configure_routes(api);
        profile::configure_routes(api);
    }));
}
