use actix_web::{web, App, HttpServer};
use accounts_backend::config::ServerConfig;
use accounts_backend::middleware::RequestTrace;
use accounts_backend::state::{build_state, SecurityConfig};
use accounts_backend::{routes, telemetry};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    // There is no fallback key; a missing secret stops startup.
    let security = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            error!(error = %e, "Refusing to start without a token secret");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_env(server.runtime_env)
        .with_security(security)
        .build()
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, env = ?server.runtime_env, "Starting accounts backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
