mod config;
mod db;
mod embedding;
mod errors;
mod llm_client;
mod models;
mod notify;
mod routes;
mod screening;
mod state;
#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::embedding::FastEmbedder;
use crate::llm_client::LlmClient;
use crate::notify::SmtpMailer;
use crate::routes::build_router;
use crate::screening::cache::SummaryCache;
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

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and make sure the candidates table exists
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Initialize the chat model client
    let llm = LlmClient::new(
        &config.ollama_url,
        &config.ollama_model,
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {} at {})",
        config.ollama_model, config.ollama_url
    );

    // Load the embedding model once; the first run may download weights
    let model_name = config.embedding_model.clone();
    let embedder = tokio::task::spawn_blocking(move || FastEmbedder::new(&model_name)).await??;
    info!("Embedding model ready ({})", config.embedding_model);

    let mailer = SmtpMailer::new(&config.smtp_host, config.smtp_port);
    info!(
        "Worker pool size: {}, SMTP relay: {}:{}",
        config.worker_pool_size, config.smtp_host, config.smtp_port
    );

    let state = AppState {
        db,
        llm: Arc::new(llm),
        embedder: Arc::new(embedder),
        mailer: Arc::new(mailer),
        summaries: Arc::new(SummaryCache::with_capacity(config.summary_cache_capacity)),
        config: config.clone(),
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
