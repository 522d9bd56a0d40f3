//! Match Pipeline — ranks a user's resumes against one of their job descriptions.
//!
//! Flow: load JD → load resumes (upload order, bounded) → rank →
//!       persist history → return response.
//!
//! Ranking itself is pure; everything stateful happens here.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::ranker::{Candidate, RankStatus, ResumeRanker};
use crate::models::match_result::{MatchResultRow, NewMatchResult, NewMatchRun};
use crate::store::DocumentStore;

const NO_CANDIDATES_MESSAGE: &str = "No resumes uploaded yet. Upload resumes to run a match.";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub user_id: Uuid,
    pub jd_id: Uuid,
    /// Any value accepted; clamped to 1..=50. Defaults from config when absent.
    pub top_k: Option<i64>,
}

/// Limits applied by the pipeline, taken from `Config`.
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub max_candidates: i64,
    pub default_top_k: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchedResume {
    pub rank: i32,
    pub resume_id: Uuid,
    pub filename: String,
    /// Cosine similarity, 0.0 – 1.0
    pub score: f64,
    /// `score` on a 0 – 100 scale, two decimals
    pub score_percent: f64,
    pub matched_terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    /// Absent when nothing was ranked (and so nothing persisted).
    pub run_id: Option<Uuid>,
    pub jd_id: Uuid,
    pub status: RankStatus,
    pub message: Option<String>,
    pub total_candidates: usize,
    pub top_k: usize,
    pub ranker_backend: String,
    pub results: Vec<MatchedResume>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

pub async fn run_match(
    store: &dyn DocumentStore,
    ranker: &dyn ResumeRanker,
    limits: MatchLimits,
    request: MatchRequest,
) -> Result<MatchResponse, AppError> {
    let MatchRequest {
        user_id,
        jd_id,
        top_k,
    } = request;

    let jd = store
        .get_job_description(user_id, jd_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job description {jd_id} not found")))?;

    let resumes = store
        .resumes_for_matching(user_id, limits.max_candidates.max(1))
        .await?;

    let candidates: Vec<Candidate<'_, Uuid>> = resumes
        .iter()
        .map(|r| Candidate {
            key: r.id,
            text: r.text.as_str(),
        })
        .collect();

    let requested_k = top_k.unwrap_or(limits.default_top_k);
    let outcome = ranker.rank(&jd.body, &candidates, requested_k);

    info!(
        "Match for user {user_id}, JD {jd_id}: {} candidates, top_k={} (requested {requested_k}), backend={}",
        outcome.total_candidates,
        outcome.top_k,
        ranker.backend()
    );

    if outcome.status == RankStatus::NoCandidates {
        return Ok(MatchResponse {
            run_id: None,
            jd_id,
            status: outcome.status,
            message: Some(NO_CANDIDATES_MESSAGE.to_string()),
            total_candidates: 0,
            top_k: outcome.top_k,
            ranker_backend: ranker.backend().to_string(),
            results: vec![],
        });
    }

    let results: Vec<NewMatchResult> = outcome
        .results
        .into_iter()
        .zip(1..)
        .filter_map(|(ranked, rank)| {
            let resume = resumes.iter().find(|r| r.id == ranked.key)?;
            debug!(
                "  #{rank} {} ({}) score={:.4} terms={:?}",
                resume.filename, resume.id, ranked.score, ranked.matched_terms
            );
            Some(NewMatchResult {
                resume_id: resume.id,
                resume_filename: resume.filename.clone(),
                rank,
                score: ranked.score,
                matched_terms: ranked.matched_terms,
            })
        })
        .collect();

    let run_id = Uuid::new_v4();
    let rows = store
        .record_match_run(NewMatchRun {
            run_id,
            user_id,
            jd_id,
            ranker_backend: ranker.backend().to_string(),
            results,
        })
        .await?;

    Ok(MatchResponse {
        run_id: Some(run_id),
        jd_id,
        status: RankStatus::Ranked,
        message: None,
        total_candidates: outcome.total_candidates,
        top_k: outcome.top_k,
        ranker_backend: ranker.backend().to_string(),
        results: rows.iter().map(MatchedResume::from).collect(),
    })
}

impl From<&MatchResultRow> for MatchedResume {
    fn from(row: &MatchResultRow) -> Self {
        Self {
            rank: row.rank,
            resume_id: row.resume_id,
            filename: row.resume_filename.clone(),
            score: row.score,
            score_percent: score_percent(row.score),
            matched_terms: row.matched_terms.clone(),
        }
    }
}

/// Scales a [0, 1] score to 0 – 100, rounded to two decimals.
pub fn score_percent(score: f64) -> f64 {
    (score.clamp(0.0, 1.0) * 10_000.0).round() / 100.0
}
