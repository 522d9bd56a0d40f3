pub mod job_description;
pub mod match_result;
pub mod resume;
