//! Sentence embeddings and vector similarity.
//!
//! The embedding model is loaded once per process and shared behind the
//! `Embedder` trait. Embedding is CPU-bound and synchronous; async callers
//! run it on the blocking pool.

use std::sync::Mutex;

use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use tracing::info;

use crate::errors::AppError;

/// Turns a piece of text into a fixed-length vector.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;
}

/// Local ONNX sentence-embedding model (all-MiniLM-L6-v2 by default).
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedder {
    pub fn new(model_name: &str) -> Result<Self, AppError> {
        let model = resolve_model(model_name)?;
        info!("Loading embedding model {model_name}");
        let embedding = TextEmbedding::try_new(TextInitOptions::new(model))
            .map_err(|e| AppError::Embedding(e.to_string()))?;
        Ok(Self {
            model: Mutex::new(embedding),
        })
    }
}

impl Embedder for FastEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| AppError::Embedding("embedding model lock poisoned".to_string()))?;
        model
            .embed(vec![text], None)
            .map_err(|e| AppError::Embedding(e.to_string()))?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Embedding("embedding model returned no vector".to_string()))
    }
}

/// Accepts the short sentence-transformers name as well as fastembed model codes.
fn resolve_model(name: &str) -> Result<EmbeddingModel, AppError> {
    if name.eq_ignore_ascii_case("all-MiniLM-L6-v2")
        || name.eq_ignore_ascii_case("sentence-transformers/all-MiniLM-L6-v2")
    {
        return Ok(EmbeddingModel::AllMiniLML6V2);
    }
    name.parse::<EmbeddingModel>()
        .map_err(|e| AppError::Embedding(format!("unknown embedding model '{name}': {e}")))
}

/// Normalized dot product of two vectors.
/// Returns 0.0 for mismatched lengths or a zero-norm input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
