//! In-memory `DocumentStore` used by handler and pipeline tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job_description::{JobDescriptionRow, NewJobDescription};
use crate::models::match_result::{MatchResultRow, NewMatchRun};
use crate::models::resume::{NewResume, ResumeRow};
use crate::store::DocumentStore;

#[derive(Default)]
struct Tables {
    job_descriptions: Vec<JobDescriptionRow>,
    resumes: Vec<ResumeRow>,
    match_results: Vec<MatchResultRow>,
    /// Monotonic clock so insertion order is reflected in `created_at`.
    tick: i64,
}

impl Tables {
    fn now(&mut self) -> chrono::DateTime<Utc> {
        self.tick += 1;
        Utc::now() + Duration::milliseconds(self.tick)
    }
}

#[derive(Default)]
pub struct MemoryDocumentStore {
    tables: Mutex<Tables>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_job_description(
        &self,
        new: NewJobDescription,
    ) -> Result<JobDescriptionRow, AppError> {
        let mut tables = self.tables();
        let row = JobDescriptionRow {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            title: new.title,
            body: new.body,
            source: new.source,
            created_at: tables.now(),
        };
        tables.job_descriptions.push(row.clone());
        Ok(row)
    }

    async fn list_job_descriptions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<JobDescriptionRow>, AppError> {
        let tables = self.tables();
        Ok(tables
            .job_descriptions
            .iter()
            .rev()
            .filter(|jd| jd.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_job_description(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<JobDescriptionRow>, AppError> {
        let tables = self.tables();
        Ok(tables
            .job_descriptions
            .iter()
            .find(|jd| jd.id == id && jd.user_id == user_id)
            .cloned())
    }

    async fn create_resume(&self, new: NewResume) -> Result<ResumeRow, AppError> {
        let mut tables = self.tables();
        let row = ResumeRow {
            id: new.id,
            user_id: new.user_id,
            filename: new.filename,
            content_type: new.content_type,
            s3_key: new.s3_key,
            text: new.text,
            created_at: tables.now(),
        };
        tables.resumes.push(row.clone());
        Ok(row)
    }

    async fn list_resumes(&self, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
        let tables = self.tables();
        Ok(tables
            .resumes
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn resumes_for_matching(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<ResumeRow>, AppError> {
        let tables = self.tables();
        Ok(tables
            .resumes
            .iter()
            .filter(|r| r.user_id == user_id)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn record_match_run(&self, run: NewMatchRun) -> Result<Vec<MatchResultRow>, AppError> {
        let mut tables = self.tables();
        let created_at = tables.now();
        let rows: Vec<MatchResultRow> = run
            .results
            .into_iter()
            .map(|result| MatchResultRow {
                id: Uuid::new_v4(),
                run_id: run.run_id,
                user_id: run.user_id,
                jd_id: run.jd_id,
                resume_id: result.resume_id,
                resume_filename: result.resume_filename,
                rank: result.rank,
                score: result.score,
                matched_terms: result.matched_terms,
                ranker_backend: run.ranker_backend.clone(),
                created_at,
            })
            .collect();
        tables.match_results.extend(rows.iter().cloned());
        Ok(rows)
    }

    async fn list_match_results(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<MatchResultRow>, AppError> {
        let tables = self.tables();
        let mut rows: Vec<MatchResultRow> = tables
            .match_results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(a.run_id.cmp(&b.run_id))
                .then(a.rank.cmp(&b.rank))
        });
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_resume(user_id: Uuid, filename: &str) -> NewResume {
        NewResume {
            id: Uuid::new_v4(),
            user_id,
            filename: filename.to_string(),
            content_type: "text/plain".to_string(),
            s3_key: format!("resumes/{user_id}/{filename}"),
            text: "rust engineer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_resumes_for_matching_upload_order_and_limit() {
        let store = MemoryDocumentStore::new();
        let user = Uuid::new_v4();
        for name in ["a.txt", "b.txt", "c.txt"] {
            store.create_resume(new_resume(user, name)).await.unwrap();
        }
        store
            .create_resume(new_resume(Uuid::new_v4(), "other.txt"))
            .await
            .unwrap();

        let rows = store.resumes_for_matching(user, 2).await.unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        let listed = store.list_resumes(user).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].filename, "c.txt");
    }

    #[tokio::test]
    async fn test_job_descriptions_scoped_by_user() {
        let store = MemoryDocumentStore::new();
        let owner = Uuid::new_v4();
        let jd = store
            .create_job_description(NewJobDescription {
                user_id: owner,
                title: "Backend".to_string(),
                body: "rust".to_string(),
                source: "manual".to_string(),
            })
            .await
            .unwrap();

        assert!(store
            .get_job_description(owner, jd.id)
            .await
            .unwrap()
            .is_some());
        assert!(store
            .get_job_description(Uuid::new_v4(), jd.id)
            .await
            .unwrap()
            .is_none());
    }
}
