mod applications;
mod chat;
mod config;
mod contacts;
mod db;
mod errors;
mod followup;
mod llm_client;
mod resume;
mod routes;
mod search;
mod state;
mod suggest;
mod text;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::connect_optional;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobTrack API v{}", env!("CARGO_PKG_VERSION"));

    if config.serpapi_key.is_none() {
        warn!("SERPAPI_KEY not set; job search and contact discovery are disabled");
    }
    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY not set; generation endpoints will use templates");
    } else {
        info!("LLM client initialized (model: {})", llm_client::MODEL);
    }

    // Optional document store for application submissions
    let db = connect_optional(config.database_url.as_deref()).await;

    let http = reqwest::Client::new();
    let state = AppState::new(&config, http, db);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
