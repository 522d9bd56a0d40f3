//! Axum route handlers for the Job Description API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::job_descriptions::generator::generate_job_description;
use crate::models::job_description::{JobDescriptionRow, NewJobDescription};
use crate::routes::UserIdQuery;
use crate::state::AppState;

const MAX_TITLE_LEN: usize = 200;
const UNTITLED: &str = "Untitled job description";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateJdRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateJdRequest {
    pub user_id: Uuid,
    pub profile: String,
    #[serde(default)]
    pub save: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateJdResponse {
    pub title: String,
    pub job_description: String,
    /// Set when the generated JD was stored.
    pub jd_id: Option<Uuid>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jds
pub async fn handle_create_jd(
    State(state): State<AppState>,
    Json(request): Json<CreateJdRequest>,
) -> Result<(StatusCode, Json<JobDescriptionRow>), AppError> {
    if request.body.trim().is_empty() {
        return Err(AppError::Validation("body cannot be empty".to_string()));
    }

    let row = state
        .store
        .create_job_description(NewJobDescription {
            user_id: request.user_id,
            title: normalize_title(&request.title),
            body: request.body,
            source: "manual".to_string(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/jds
pub async fn handle_list_jds(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<JobDescriptionRow>>, AppError> {
    Ok(Json(state.store.list_job_descriptions(params.user_id).await?))
}

/// GET /api/v1/jds/:id
pub async fn handle_get_jd(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<JobDescriptionRow>, AppError> {
    state
        .store
        .get_job_description(params.user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job description {id} not found")))
}

/// POST /api/v1/jds/generate
///
/// Drafts a JD for a role profile. Stored only when `save` is set.
pub async fn handle_generate_jd(
    State(state): State<AppState>,
    Json(request): Json<GenerateJdRequest>,
) -> Result<Json<GenerateJdResponse>, AppError> {
    let generated = generate_job_description(&request.profile, &state.llm).await?;
    let title = normalize_title(&generated.title);

    let jd_id = if request.save {
        let row = state
            .store
            .create_job_description(NewJobDescription {
                user_id: request.user_id,
                title: title.clone(),
                body: generated.description.clone(),
                source: "generated".to_string(),
            })
            .await?;
        Some(row.id)
    } else {
        None
    };

    Ok(Json(GenerateJdResponse {
        title,
        job_description: generated.description,
        jd_id,
    }))
}

/// Trims a title, falling back to a placeholder and capping its length.
fn normalize_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        return UNTITLED.to_string();
    }
    title.chars().take(MAX_TITLE_LEN).collect()
}
