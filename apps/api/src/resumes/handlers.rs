//! Axum route handlers for the Resume API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewResume, ResumeRow};
use crate::resumes::archive::{archive_resume, resume_s3_key};
use crate::resumes::extract::{detect_format, extract_text};
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// Resume metadata returned to clients. The extracted text stays server-side.
#[derive(Debug, Serialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub filename: String,
    pub content_type: String,
    /// Characters of extracted text. 0 means the file will always score 0.
    pub text_length: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&ResumeRow> for ResumeSummary {
    fn from(row: &ResumeRow) -> Self {
        Self {
            id: row.id,
            filename: row.filename.clone(),
            content_type: row.content_type.clone(),
            text_length: row.text.chars().count(),
            created_at: row.created_at,
        }
    }
}

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/v1/resumes
///
/// Multipart form with a `user_id` text field and a `file` field.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeSummary>), AppError> {
    let mut user_id: Option<Uuid> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("user_id") => {
                let raw = field.text().await.map_err(multipart_error)?;
                let parsed = Uuid::parse_str(raw.trim())
                    .map_err(|_| AppError::Validation("user_id must be a UUID".to_string()))?;
                user_id = Some(parsed);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            other => warn!("Ignoring unexpected multipart field {other:?}"),
        }
    }

    let user_id =
        user_id.ok_or_else(|| AppError::Validation("user_id field is required".to_string()))?;
    let file = file.ok_or_else(|| AppError::Validation("file field is required".to_string()))?;
    if file.bytes.is_empty() {
        return Err(AppError::Validation("file is empty".to_string()));
    }

    let format = detect_format(&file.filename, file.content_type.as_deref())?;

    // pdf-extract is CPU-bound and may panic on malformed input
    let bytes = file.bytes.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(format, &bytes))
        .await
        .map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not extract resume text: {e}"))
        })??;

    if text.is_empty() {
        warn!(
            "Resume '{}' for user {user_id} yielded no text; it will score 0 in matches",
            file.filename
        );
    }

    let resume_id = Uuid::new_v4();
    let s3_key = resume_s3_key(user_id, resume_id, &file.filename);
    archive_resume(
        &state.s3,
        &state.config.s3_bucket,
        &s3_key,
        format.content_type(),
        file.bytes,
    )
    .await?;

    let row = state
        .store
        .create_resume(NewResume {
            id: resume_id,
            user_id,
            filename: file.filename,
            content_type: format.content_type().to_string(),
            s3_key,
            text,
        })
        .await?;

    info!(
        "Uploaded resume {} for user {user_id} ({} chars of text)",
        row.id,
        row.text.len()
    );
    Ok((StatusCode::CREATED, Json(ResumeSummary::from(&row))))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let rows = state.store.list_resumes(params.user_id).await?;
    Ok(Json(rows.iter().map(ResumeSummary::from).collect()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
