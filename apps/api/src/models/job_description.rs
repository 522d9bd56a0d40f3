use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobDescriptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    /// "manual" | "generated"
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to store a new job description.
#[derive(Debug, Clone)]
pub struct NewJobDescription {
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub source: String,
}
