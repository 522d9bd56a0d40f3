//! Resume Ranker — scores candidate resumes against a job description.
//!
//! Default: `TfIdfRanker` (pure-Rust TF-IDF + cosine, deterministic, stateless).
//!
//! `AppState` holds an `Arc<dyn ResumeRanker>` so the backend can be swapped
//! without touching the match pipeline or handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::similarity::{cosine_similarity, shared_terms};
use crate::matching::vectorizer::vectorize;

/// Upper bound on the number of ranked results returned by one call.
pub const MAX_TOP_K: usize = 50;

/// Number of explanatory terms attached to each ranked candidate.
pub const MATCHED_TERMS_LIMIT: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A candidate document paired with a caller-defined key. The key is opaque
/// to the engine.
#[derive(Debug, Clone)]
pub struct Candidate<'a, K> {
    pub key: K,
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate<K> {
    pub key: K,
    /// Cosine similarity, 0.0 – 1.0
    pub score: f64,
    /// Shared terms contributing most to the score, strongest first.
    pub matched_terms: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankStatus {
    Ranked,
    NoCandidates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankOutcome<K> {
    pub status: RankStatus,
    /// Descending by score, at most `top_k` entries.
    pub results: Vec<RankedCandidate<K>>,
    pub total_candidates: usize,
    /// The clamped result count actually applied.
    pub top_k: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Ranks a user's resumes against one job description.
pub trait ResumeRanker: Send + Sync {
    /// Short backend label reported alongside results.
    fn backend(&self) -> &'static str;

    fn rank(
        &self,
        reference: &str,
        candidates: &[Candidate<'_, Uuid>],
        requested_k: i64,
    ) -> RankOutcome<Uuid>;
}

// ────────────────────────────────────────────────────────────────────────────
// TfIdfRanker — default implementation
// ────────────────────────────────────────────────────────────────────────────

pub struct TfIdfRanker;

impl ResumeRanker for TfIdfRanker {
    fn backend(&self) -> &'static str {
        "tfidf"
    }

    fn rank(
        &self,
        reference: &str,
        candidates: &[Candidate<'_, Uuid>],
        requested_k: i64,
    ) -> RankOutcome<Uuid> {
        rank_candidates(reference, candidates, requested_k)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core ranking algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Clamps a caller-requested result count into `[1, MAX_TOP_K]`.
pub fn clamp_top_k(requested: i64) -> usize {
    requested.clamp(1, MAX_TOP_K as i64) as usize
}

/// Ranks `candidates` by TF-IDF cosine similarity to `reference`.
///
/// Algorithm:
/// 1. Vectorize `[reference] + candidates` as one corpus
/// 2. Score every candidate against the reference vector
/// 3. Stable sort by score descending (equal scores keep input order)
/// 4. Truncate to the clamped K
pub fn rank_candidates<K: Clone>(
    reference: &str,
    candidates: &[Candidate<'_, K>],
    requested_k: i64,
) -> RankOutcome<K> {
    let top_k = clamp_top_k(requested_k);

    if candidates.is_empty() {
        return no_candidates(top_k);
    }

    let corpus: Vec<&str> = std::iter::once(reference)
        .chain(candidates.iter().map(|c| c.text))
        .collect();
    let vectorized = vectorize(&corpus);
    let Some((reference_vector, candidate_vectors)) = vectorized.vectors.split_first() else {
        return no_candidates(top_k);
    };

    let mut results: Vec<RankedCandidate<K>> = candidates
        .iter()
        .zip(candidate_vectors)
        .map(|(candidate, vector)| RankedCandidate {
            key: candidate.key.clone(),
            score: cosine_similarity(reference_vector, vector),
            matched_terms: shared_terms(
                reference_vector,
                vector,
                &vectorized.vocabulary,
                MATCHED_TERMS_LIMIT,
            ),
        })
        .collect();

    // sort_by is stable: ties keep candidate input order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(top_k);

    RankOutcome {
        status: RankStatus::Ranked,
        results,
        total_candidates: candidates.len(),
        top_k,
    }
}

fn no_candidates<K>(top_k: usize) -> RankOutcome<K> {
    RankOutcome {
        status: RankStatus::NoCandidates,
        results: vec![],
        total_candidates: 0,
        top_k,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates<'a>(texts: &[&'a str]) -> Vec<Candidate<'a, usize>> {
        texts
            .iter()
            .copied()
            .enumerate()
            .map(|(key, text)| Candidate { key, text })
            .collect()
    }

    fn keys(outcome: &RankOutcome<usize>) -> Vec<usize> {
        outcome.results.iter().map(|r| r.key).collect()
    }

    fn score_of(outcome: &RankOutcome<usize>, key: usize) -> f64 {
        outcome
            .results
            .iter()
            .find(|r| r.key == key)
            .map(|r| r.score)
            .unwrap()
    }

    #[test]
    fn test_clamp_top_k() {
        assert_eq!(clamp_top_k(0), 1);
        assert_eq!(clamp_top_k(-7), 1);
        assert_eq!(clamp_top_k(i64::MIN), 1);
        assert_eq!(clamp_top_k(5), 5);
        assert_eq!(clamp_top_k(50), 50);
        assert_eq!(clamp_top_k(1000), 50);
        assert_eq!(clamp_top_k(i64::MAX), 50);
    }

    #[test]
    fn test_no_candidates_is_not_an_error() {
        let outcome = rank_candidates::<usize>("rust engineer", &[], 5);
        assert_eq!(outcome.status, RankStatus::NoCandidates);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.total_candidates, 0);
        assert_eq!(outcome.top_k, 5);
    }

    #[test]
    fn test_self_similarity_is_the_maximum() {
        let jd = "senior backend engineer with five years of experience in distributed systems";
        let outcome = rank_candidates(
            jd,
            &candidates(&[
                "backend engineer experience",
                jd,
                "frontend designer with figma experience",
            ]),
            10,
        );
        assert_eq!(outcome.results[0].key, 1);
        assert!((outcome.results[0].score - 1.0).abs() < 1e-9);
        for result in &outcome.results[1..] {
            assert!(result.score < outcome.results[0].score);
        }
    }

    #[test]
    fn test_empty_candidate_scores_zero_and_ranks_last() {
        let outcome = rank_candidates(
            "data scientist role",
            &candidates(&["", "data scientist with machine learning experience"]),
            5,
        );
        assert_eq!(keys(&outcome), vec![1, 0]);
        assert_eq!(score_of(&outcome, 0), 0.0);
        assert!(score_of(&outcome, 1) > 0.0);
        assert!(outcome.results[1].matched_terms.is_empty());
    }

    #[test]
    fn test_empty_reference_scores_everything_zero() {
        let outcome = rank_candidates("", &candidates(&["rust engineer", "python dev"]), 5);
        assert_eq!(outcome.status, RankStatus::Ranked);
        assert!(outcome.results.iter().all(|r| r.score == 0.0));
        // all tied at zero: input order preserved
        assert_eq!(keys(&outcome), vec![0, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let outcome = rank_candidates(
            "rust kafka engineer",
            &candidates(&[
                "python django",
                "rust kafka platform",
                "golang",
                "rust kafka platform",
            ]),
            10,
        );
        assert_eq!(score_of(&outcome, 1), score_of(&outcome, 3));
        let order = keys(&outcome);
        let pos1 = order.iter().position(|&k| k == 1).unwrap();
        let pos3 = order.iter().position(|&k| k == 3).unwrap();
        assert!(pos1 < pos3);
        // the two zero scorers also keep input order
        let pos0 = order.iter().position(|&k| k == 0).unwrap();
        let pos2 = order.iter().position(|&k| k == 2).unwrap();
        assert!(pos0 < pos2);
    }

    #[test]
    fn test_results_sorted_descending_and_in_range() {
        let outcome = rank_candidates(
            "rust distributed systems engineer kafka",
            &candidates(&[
                "rust engineer",
                "distributed systems kafka rust engineer",
                "",
                "chef cooking",
                "kafka operator",
            ]),
            50,
        );
        assert_eq!(outcome.results.len(), 5);
        for pair in outcome.results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(outcome
            .results
            .iter()
            .all(|r| (0.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn test_top_k_zero_clamps_to_one() {
        let outcome = rank_candidates("rust", &candidates(&["rust", "go", "java"]), 0);
        assert_eq!(outcome.top_k, 1);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.total_candidates, 3);
    }

    #[test]
    fn test_top_k_large_clamps_to_max_and_available() {
        let few = rank_candidates("rust", &candidates(&["rust", "go", "java"]), 1000);
        assert_eq!(few.top_k, MAX_TOP_K);
        assert_eq!(few.results.len(), 3);

        let texts: Vec<String> = (0..60).map(|i| format!("rust engineer number{i}")).collect();
        let many: Vec<Candidate<'_, usize>> = texts
            .iter()
            .enumerate()
            .map(|(key, text)| Candidate {
                key,
                text: text.as_str(),
            })
            .collect();
        let outcome = rank_candidates("rust engineer", &many, 1000);
        assert_eq!(outcome.results.len(), MAX_TOP_K);
        assert_eq!(outcome.total_candidates, 60);
    }

    #[test]
    fn test_deterministic_output() {
        let texts = [
            "rust kafka kubernetes",
            "java spring",
            "rust axum tokio sqlx",
            "",
            "kafka streams java",
        ];
        let a = rank_candidates("rust backend kafka", &candidates(&texts), 3);
        let b = rank_candidates("rust backend kafka", &candidates(&texts), 3);
        assert_eq!(keys(&a), keys(&b));
        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.score.to_bits(), y.score.to_bits());
            assert_eq!(x.matched_terms, y.matched_terms);
        }
    }

    #[test]
    fn test_corpus_size_changes_weights() {
        let jd = "rust backend engineer";
        let target = "rust backend engineer kafka";

        let small = rank_candidates(jd, &candidates(&[target, "frontend designer"]), 10);
        let large = rank_candidates(
            jd,
            &candidates(&[
                target,
                "frontend designer",
                "rust compiler",
                "rust compiler",
                "rust compiler",
            ]),
            10,
        );

        let small_score = score_of(&small, 0);
        let large_score = score_of(&large, 0);
        assert!((0.0..=1.0).contains(&small_score));
        assert!((0.0..=1.0).contains(&large_score));
        assert!((small_score - large_score).abs() > 1e-6);
    }

    #[test]
    fn test_matched_terms_explain_score() {
        let outcome = rank_candidates(
            "rust kafka engineer",
            &candidates(&["rust engineer who likes kafka and rust"]),
            1,
        );
        let terms = &outcome.results[0].matched_terms;
        assert!(terms.contains(&"rust".to_string()));
        assert!(terms.contains(&"kafka".to_string()));
        assert!(!terms.contains(&"likes".to_string()));
    }

    #[test]
    fn test_tfidf_ranker_backend_with_uuid_keys() {
        let ranker = TfIdfRanker;
        let id = Uuid::new_v4();
        let outcome = ranker.rank("rust", &[Candidate { key: id, text: "rust" }], 5);
        assert_eq!(ranker.backend(), "tfidf");
        assert_eq!(outcome.results[0].key, id);
    }
}
