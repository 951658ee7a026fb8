use crate::embedding::{cosine_similarity, Embedder};
use crate::errors::AppError;

/// Match score in 0–100: cosine similarity of the two embeddings, scaled and
/// rounded to two decimals. Deterministic for a given embedding model.
pub fn calculate_match(
    embedder: &dyn Embedder,
    jd_summary: &str,
    resume_text: &str,
) -> Result<f64, AppError> {
    let jd_vector = embedder.embed(jd_summary)?;
    let resume_vector = embedder.embed(resume_text)?;
    Ok(round2(cosine_similarity(&jd_vector, &resume_vector) * 100.0))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
