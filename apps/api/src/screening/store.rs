use sqlx::SqlitePool;
use tracing::debug;

use crate::models::candidate::CandidateRow;

/// Inserts one candidate row and returns it as stored.
/// Write-once: rows are never updated or deleted here.
pub async fn save_candidate(
    pool: &SqlitePool,
    name: &str,
    score: f64,
    resume: &str,
) -> Result<CandidateRow, sqlx::Error> {
    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates (name, score, resume)
        VALUES (?, ?, ?)
        RETURNING id, name, score, resume
        "#,
    )
    .bind(name)
    .bind(score)
    .bind(resume)
    .fetch_one(pool)
    .await?;

    debug!("Saved candidate {} (id {}, score {})", row.name, row.id, row.score);
    Ok(row)
}
