use anyhow::{Context, Result};

const DEFAULT_DATABASE_URL: &str = "sqlite://job_screening.db";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "mistral";
const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Application configuration loaded from environment variables.
/// Every variable has a default so a bare local checkout starts against
/// a local Ollama and a SQLite file in the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub llm_timeout_secs: u64,
    pub embedding_model: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub worker_pool_size: usize,
    pub summary_cache_capacity: usize,
    pub max_upload_mb: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            ollama_url: env_or("OLLAMA_URL", DEFAULT_OLLAMA_URL),
            ollama_model: env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            embedding_model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            smtp_host: env_or("SMTP_HOST", DEFAULT_SMTP_HOST),
            smtp_port: parse_env("SMTP_PORT", 587)?,
            worker_pool_size: parse_env("WORKER_POOL_SIZE", default_worker_pool_size())?,
            summary_cache_capacity: parse_env(
                "SUMMARY_CACHE_CAPACITY",
                crate::screening::cache::DEFAULT_CAPACITY,
            )?,
            max_upload_mb: parse_env("MAX_UPLOAD_MB", 50)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Same sizing rule as a default thread-pool executor: cpus + 4, capped at 32.
pub fn default_worker_pool_size() -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cpus + 4).min(32)
}
