// Prompt constants for job-description generation.

/// System prompt for JD generation — enforces JSON-only output.
pub const JD_GENERATE_SYSTEM: &str =
    "You are an experienced technical recruiter who writes clear, inclusive job descriptions. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// JD generation prompt template. Replace `{profile}` before sending.
pub const JD_GENERATE_PROMPT_TEMPLATE: &str = r#"Write a job description for the role profile: "{profile}".

Cover, in plain prose with short bulleted lists where natural:
- a two-sentence role summary
- key responsibilities
- required skills and experience
- nice-to-have skills

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Senior Software Engineer",
  "description": "full job description text"
}"#;
