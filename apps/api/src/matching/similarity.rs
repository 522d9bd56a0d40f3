use crate::matching::vector::{SparseVector, TermId};
use crate::matching::vectorizer::Vocabulary;

/// Cosine similarity of two non-negative vectors, in [0, 1].
///
/// Empty vectors and zero-norm vectors score 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let norms = a.norm() * b.norm();
    if norms == 0.0 {
        return 0.0;
    }
    (a.dot(b) / norms).clamp(0.0, 1.0)
}

/// Shared terms ranked by their contribution `a[t] * b[t]` to the dot product,
/// largest first, ties broken by term id. At most `limit` terms are returned.
pub fn shared_terms(
    a: &SparseVector,
    b: &SparseVector,
    vocabulary: &Vocabulary,
    limit: usize,
) -> Vec<String> {
    let mut contributions: Vec<(TermId, f64)> = a
        .iter()
        .filter_map(|(term, weight)| b.get(term).map(|w| (term, weight * w)))
        .filter(|(_, product)| *product > 0.0)
        .collect();

    contributions.sort_by(|x, y| y.1.total_cmp(&x.1).then(x.0.cmp(&y.0)));

    contributions
        .into_iter()
        .take(limit)
        .filter_map(|(term, _)| vocabulary.term(term).map(str::to_string))
        .collect()
}
