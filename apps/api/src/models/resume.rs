use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub s3_key: String,
    /// Extracted plain text. Empty when extraction produced nothing usable.
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to store a new resume. The id is chosen by the caller so the
/// S3 key can embed it before the row exists.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub filename: String,
    pub content_type: String,
    pub s3_key: String,
    pub text: String,
}
