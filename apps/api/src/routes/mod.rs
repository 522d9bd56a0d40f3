pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::job_descriptions::handlers as jds;
use crate::matching::handlers as matches;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Identity of the caller. Authentication happens upstream of this service.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Job descriptions
        .route(
            "/api/v1/jds",
            post(jds::handle_create_jd).get(jds::handle_list_jds),
        )
        .route("/api/v1/jds/generate", post(jds::handle_generate_jd))
        .route("/api/v1/jds/:id", get(jds::handle_get_jd))
        // Resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload_resume)
                .get(resumes::handle_list_resumes)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Matching
        .route(
            "/api/v1/matches",
            post(matches::handle_run_match).get(matches::handle_list_matches),
        )
        .with_state(state)
}
