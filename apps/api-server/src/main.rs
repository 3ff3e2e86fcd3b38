//! # Blogpost API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blogpost_core::ports::{PasswordService, TokenService};
use blogpost_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::error::json_error_handler;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blogpost API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application state");
        std::io::Error::other(e)
    })?;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
