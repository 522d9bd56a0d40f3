// Resume-to-job-description matching.
// tokenizer → vectorizer (TF-IDF) → similarity (cosine) → ranker (top-K).
// The engine keeps no state between calls; the pipeline handles storage.

pub mod handlers;
pub mod pipeline;
pub mod ranker;
pub mod similarity;
pub mod tokenizer;
pub mod vector;
pub mod vectorizer;
