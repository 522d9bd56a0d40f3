//! Document Store — persistence for job descriptions, resumes and match history.
//!
//! Every query is scoped by `user_id`; a row owned by another user is treated
//! as absent. `AppState` carries an `Arc<dyn DocumentStore>`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_description::{JobDescriptionRow, NewJobDescription};
use crate::models::match_result::{MatchResultRow, NewMatchRun};
use crate::models::resume::{NewResume, ResumeRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgDocumentStore;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create_job_description(
        &self,
        new: NewJobDescription,
    ) -> Result<JobDescriptionRow, AppError>;

    /// Newest first.
    async fn list_job_descriptions(&self, user_id: Uuid)
        -> Result<Vec<JobDescriptionRow>, AppError>;

    async fn get_job_description(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<JobDescriptionRow>, AppError>;

    async fn create_resume(&self, new: NewResume) -> Result<ResumeRow, AppError>;

    /// Newest first.
    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError>;

    /// Resumes in upload order (`created_at`, then `id`), at most `limit`.
    /// This order is the candidate input order of a match run.
    async fn resumes_for_matching(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ResumeRow>, AppError>;

    /// Persists every result of a run atomically; returns rows in rank order.
    async fn record_match_run(&self, run: NewMatchRun) -> Result<Vec<MatchResultRow>, AppError>;

    /// Newest run first, rank ascending within a run, at most `limit` rows.
    async fn list_match_results(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MatchResultRow>, AppError>;
}
