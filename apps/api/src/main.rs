mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::{build_cors, build_router};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{crate_name}={level},tower_http={level}",
                crate_name = env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RoleReady API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(&config)?;
    info!("LLM client initialized (model: {})", llm.model());

    let cors = build_cors(&config.allowed_origins)?;
    info!("CORS origins: {:?}", config.allowed_origins);

    // Build app state
    let state = AppState {
        analyzer: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
