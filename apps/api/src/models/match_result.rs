use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One ranked candidate of a persisted match run.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchResultRow {
    pub id: Uuid,
    pub run_id: Uuid,
    pub user_id: Uuid,
    pub jd_id: Uuid,
    pub resume_id: Uuid,
    pub resume_filename: String,
    /// 1-based position within the run.
    pub rank: i32,
    /// Cosine similarity, 0.0 – 1.0
    pub score: f64,
    pub matched_terms: Vec<String>,
    pub ranker_backend: String,
    pub created_at: DateTime<Utc>,
}

/// A ranked candidate about to be persisted.
#[derive(Debug, Clone)]
pub struct NewMatchResult {
    pub resume_id: Uuid,
    pub resume_filename: String,
    pub rank: i32,
    pub score: f64,
    pub matched_terms: Vec<String>,
}

/// A whole match run about to be persisted.
#[derive(Debug, Clone)]
pub struct NewMatchRun {
    pub run_id: Uuid,
    pub user_id: Uuid,
    pub jd_id: Uuid,
    pub ranker_backend: String,
    pub results: Vec<NewMatchResult>,
}
