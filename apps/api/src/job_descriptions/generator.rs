//! JD Generator — drafts a job description for a role profile via the LLM.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::job_descriptions::prompts::{JD_GENERATE_PROMPT_TEMPLATE, JD_GENERATE_SYSTEM};
use crate::llm_client::LlmClient;

/// Longest role profile accepted in a generation request.
pub const MAX_PROFILE_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedJobDescription {
    pub title: String,
    pub description: String,
}

/// Validates a role profile and returns it trimmed.
pub fn normalize_profile(profile: &str) -> Result<&str, AppError> {
    let profile = profile.trim();
    if profile.is_empty() {
        return Err(AppError::Validation("profile cannot be empty".to_string()));
    }
    if profile.chars().count() > MAX_PROFILE_LEN {
        return Err(AppError::Validation(format!(
            "profile must be at most {MAX_PROFILE_LEN} characters"
        )));
    }
    Ok(profile)
}

pub fn build_prompt(profile: &str) -> String {
    JD_GENERATE_PROMPT_TEMPLATE.replace("{profile}", profile)
}

pub async fn generate_job_description(
    profile: &str,
    llm: &LlmClient,
) -> Result<GeneratedJobDescription, AppError> {
    let profile = normalize_profile(profile)?;
    let generated: GeneratedJobDescription = llm
        .call_json(&build_prompt(profile), JD_GENERATE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("JD generation failed: {e}")))?;

    if generated.description.trim().is_empty() {
        return Err(AppError::Llm(
            "JD generation returned an empty description".to_string(),
        ));
    }

    info!(
        "Generated job description for profile '{profile}' ({} chars)",
        generated.description.len()
    );
    Ok(generated)
}
