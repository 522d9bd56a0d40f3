use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::ranker::ResumeRanker;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    /// Archive for the raw uploaded resume files.
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable resume ranker. Default: TfIdfRanker.
    pub ranker: Arc<dyn ResumeRanker>,
}

#[cfg(test)]
impl AppState {
    /// State backed by the in-memory store, with offline S3/LLM clients.
    pub fn for_tests(store: Arc<dyn DocumentStore>) -> Self {
        use aws_sdk_s3::config::{BehaviorVersion, Region};

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();

        Self {
            store,
            s3: S3Client::from_conf(s3_config),
            llm: LlmClient::new("test-key".to_string()).expect("http client"),
            config: Config {
                database_url: "postgres://localhost/test".to_string(),
                s3_bucket: "test-bucket".to_string(),
                s3_endpoint: "http://localhost:9000".to_string(),
                aws_access_key_id: "test".to_string(),
                aws_secret_access_key: "test".to_string(),
                anthropic_api_key: "test-key".to_string(),
                port: 8080,
                rust_log: "debug".to_string(),
                match_max_candidates: 200,
                match_default_top_k: 5,
                max_upload_bytes: 1024 * 1024,
            },
            ranker: Arc::new(crate::matching::ranker::TfIdfRanker),
        }
    }
}
