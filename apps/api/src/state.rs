use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::embedding::Embedder;
use crate::llm_client::ChatModel;
use crate::notify::Mailer;
use crate::screening::cache::SummaryCache;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub llm: Arc<dyn ChatModel>,
    /// Loaded once per process; embedding runs on the blocking pool.
    pub embedder: Arc<dyn Embedder>,
    pub mailer: Arc<dyn Mailer>,
    /// Job summaries keyed by job text, shared across requests.
    pub summaries: Arc<SummaryCache>,
    pub config: Config,
}
