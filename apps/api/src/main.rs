mod config;
mod errors;
mod llm_client;
mod models;
mod outreach;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::outreach::prompts::PROMPT_VERSION;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Outreach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the completion client shared by both pipeline stages
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_base_url.as_str())?;
    info!("LLM client initialized (endpoint: {})", llm.base_url());

    let pipeline = &config.pipeline;
    info!(
        "Pipeline: summarizer={}@{}, generator={}@{}, prompts={}, sender={}",
        pipeline.summarizer.model,
        pipeline.summarizer.temperature,
        pipeline.generator.model,
        pipeline.generator.temperature,
        PROMPT_VERSION,
        pipeline.sender.name
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
