use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_description::{JobDescriptionRow, NewJobDescription};
use crate::models::match_result::{MatchResultRow, NewMatchRun};
use crate::models::resume::{NewResume, ResumeRow};
use crate::store::DocumentStore;

/// PostgreSQL-backed store. Schema: `migrations/0001_init.sql`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create_job_description(
        &self,
        new: NewJobDescription,
    ) -> Result<JobDescriptionRow, AppError> {
        let row = sqlx::query_as::<_, JobDescriptionRow>(
            r#"
            INSERT INTO job_descriptions (id, user_id, title, body, source)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.body)
        .bind(&new.source)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored job description {} for user {}", row.id, row.user_id);
        Ok(row)
    }

    async fn list_job_descriptions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<JobDescriptionRow>, AppError> {
        Ok(sqlx::query_as::<_, JobDescriptionRow>(
            "SELECT * FROM job_descriptions WHERE user_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_job_description(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<JobDescriptionRow>, AppError> {
        Ok(sqlx::query_as::<_, JobDescriptionRow>(
            "SELECT * FROM job_descriptions WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn create_resume(&self, new: NewResume) -> Result<ResumeRow, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, user_id, filename, content_type, s3_key, text)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(new.id)
        .bind(new.user_id)
        .bind(&new.filename)
        .bind(&new.content_type)
        .bind(&new.s3_key)
        .bind(&new.text)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored resume {} ({}) for user {}", row.id, row.filename, row.user_id);
        Ok(row)
    }

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn resumes_for_matching(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ResumeRow>, AppError> {
        Ok(sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at ASC, id ASC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn record_match_run(&self, run: NewMatchRun) -> Result<Vec<MatchResultRow>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(run.results.len());

        for result in &run.results {
            let row = sqlx::query_as::<_, MatchResultRow>(
                r#"
                INSERT INTO match_results
                    (id, run_id, user_id, jd_id, resume_id, resume_filename,
                     rank, score, matched_terms, ranker_backend)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(run.run_id)
            .bind(run.user_id)
            .bind(run.jd_id)
            .bind(result.resume_id)
            .bind(&result.resume_filename)
            .bind(result.rank)
            .bind(result.score)
            .bind(&result.matched_terms)
            .bind(&run.ranker_backend)
            .fetch_one(&mut *tx)
            .await?;
            rows.push(row);
        }

        tx.commit().await?;

        info!(
            "Recorded match run {} ({} results) for user {}",
            run.run_id,
            rows.len(),
            run.user_id
        );
        Ok(rows)
    }

    async fn list_match_results(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MatchResultRow>, AppError> {
        Ok(sqlx::query_as::<_, MatchResultRow>(
            r#"
            SELECT * FROM match_results
            WHERE user_id = $1
            ORDER BY created_at DESC, run_id, rank ASC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?)
    }
}
