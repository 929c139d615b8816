//! # Quill Blog Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use std::io;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use quill_core::ports::SessionTokenService;
use quill_infra::database::Database;
use quill_infra::session::JwtSessionService;

mod config;
mod error;
mod handlers;
mod requester;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config =
        AppConfig::from_env().map_err(|_| io::Error::other("DATABASE_URL must be set"))?;

    tracing::info!(
        "Starting Quill blog server on {}:{}",
        config.host,
        config.port
    );

    // Open the data store and build application state
    let db = Database::open(&config.database).await.map_err(io::Error::other)?;
    let templates = state::load_templates(&config.template_glob).map_err(io::Error::other)?;
    let sessions: Arc<dyn SessionTokenService> = Arc::new(JwtSessionService::from_env());
    let state = AppState::new(&db, templates);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    db.close().await.map_err(io::Error::other)
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blog_server=debug,quill_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
