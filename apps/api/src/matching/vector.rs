#![allow(dead_code)]
//! Sparse term-weight vectors keyed by per-call vocabulary ids.

use std::collections::BTreeMap;

/// Index of a term in the vocabulary of a single matching call.
pub type TermId = u32;

/// A sparse, non-negative term-weight vector.
///
/// Entries are kept ordered by `TermId` so that every floating-point sum over
/// the vector runs in the same order and results are bit-for-bit reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: BTreeMap<TermId, f64>,
}

impl SparseVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight of `term`. Negative and non-finite weights are clamped to 0.
    pub fn insert(&mut self, term: TermId, weight: f64) {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        self.weights.insert(term, weight);
    }

    pub fn get(&self, term: TermId) -> Option<f64> {
        self.weights.get(&term).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates `(term, weight)` pairs in ascending term order.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, f64)> + '_ {
        self.weights.iter().map(|(&term, &weight)| (term, weight))
    }

    /// Dot product over the terms both vectors share.
    ///
    /// Walks the smaller vector and probes the larger one.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .iter()
            .filter_map(|(term, weight)| large.get(term).map(|w| weight * w))
            .sum()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }
}

impl FromIterator<(TermId, f64)> for SparseVector {
    fn from_iter<I: IntoIterator<Item = (TermId, f64)>>(iter: I) -> Self {
        let mut vector = SparseVector::new();
        for (term, weight) in iter {
            vector.insert(term, weight);
        }
        vector
    }
}
