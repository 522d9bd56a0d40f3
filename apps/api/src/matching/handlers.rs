//! Axum route handlers for the Match API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::pipeline::{run_match, score_percent, MatchLimits, MatchRequest, MatchResponse};
use crate::models::match_result::MatchResultRow;
use crate::state::AppState;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct MatchHistoryQuery {
    pub user_id: Uuid,
    pub limit: Option<i64>,
}

/// One row of match history as shown to clients.
#[derive(Debug, Serialize)]
pub struct MatchHistoryItem {
    pub id: Uuid,
    pub run_id: Uuid,
    pub jd_id: Uuid,
    pub resume_id: Uuid,
    pub resume_filename: String,
    pub rank: i32,
    pub score: f64,
    pub score_percent: f64,
    pub matched_terms: Vec<String>,
    pub ranker_backend: String,
    pub created_at: DateTime<Utc>,
}

impl From<MatchResultRow> for MatchHistoryItem {
    fn from(row: MatchResultRow) -> Self {
        Self {
            id: row.id,
            run_id: row.run_id,
            jd_id: row.jd_id,
            resume_id: row.resume_id,
            resume_filename: row.resume_filename,
            rank: row.rank,
            score: row.score,
            score_percent: score_percent(row.score),
            matched_terms: row.matched_terms,
            ranker_backend: row.ranker_backend,
            created_at: row.created_at,
        }
    }
}

/// POST /api/v1/matches
///
/// Ranks the user's resumes against one of their job descriptions and records
/// the result. A user with no resumes gets `status: "no_candidates"`.
pub async fn handle_run_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let limits = MatchLimits {
        max_candidates: state.config.match_max_candidates,
        default_top_k: state.config.match_default_top_k,
    };
    let response = run_match(
        state.store.as_ref(),
        state.ranker.as_ref(),
        limits,
        request,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/matches
pub async fn handle_list_matches(
    State(state): State<AppState>,
    Query(params): Query<MatchHistoryQuery>,
) -> Result<Json<Vec<MatchHistoryItem>>, AppError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let rows = state.store.list_match_results(params.user_id, limit).await?;
    Ok(Json(rows.into_iter().map(MatchHistoryItem::from).collect()))
}
