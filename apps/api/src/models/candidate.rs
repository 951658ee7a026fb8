use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted row of the `candidates` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub score: f64,
    pub resume: String,
}
