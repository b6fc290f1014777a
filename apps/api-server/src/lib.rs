//! # Blog Post API Server
//!
//! Actix-web application exposing CRUD operations on blog posts under `/posts`.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

use config::AppConfig;
use middleware::error::{json_error_handler, path_error_handler};
use observability::RequestIdMiddleware;
use state::AppState;

/// Register state, extractor configuration and routes on an app.
///
/// Used by the server and by integration tests so both run the same app.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler));
        handlers::configure_routes(cfg);
    }
}

/// Build application state from `config` and serve until shutdown.
pub async fn run(config: AppConfig) -> std::io::Result<()> {
    tracing::info!(
        "Starting Blog Post API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::from_config(config.database.as_ref()).await;

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(configure_app(state.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
