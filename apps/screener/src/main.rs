mod config;
mod conversation;
mod errors;
mod llm_client;
mod resume;
mod routes;
mod scoring;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::conversation::build_strategy;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::build_scorer;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume screener v{}", env!("CARGO_PKG_VERSION"));

    // External text-generation service, shared by the judge scorer and free-form chat.
    // Nothing is contacted until the first request that needs it.
    let llm = LlmClient::http(&config.llm_endpoint, &config.llm_model, config.llm_timeout)?;
    info!(
        "LLM client initialized (model: {}, endpoint: {})",
        llm.model(),
        config.llm_endpoint
    );

    let scorer = build_scorer(config.scorer, llm.clone());
    info!("Relevance scorer: {} ({:?} scale)", scorer.backend(), scorer.scale());

    let chat = build_strategy(config.chat_mode, llm);
    info!("Chat mode: {}", chat.mode());

    let state = AppState {
        config: config.clone(),
        scorer,
        chat,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
