#![allow(dead_code)]
//! TF-IDF vectorizer — builds one weighted term vector per document.
//!
//! Every call starts from an empty vocabulary. Document frequencies, and so
//! IDF weights, come only from the documents passed to that call.
//!
//! Weighting:
//! - `idf(t) = ln((n_docs + 1) / (df(t) + 1)) + 1`
//! - `ntf(t) = tf(t) / max_tf` within a document
//! - `weight(t) = ntf(t) * idf(t)`

use std::collections::{HashMap, HashSet};

use crate::matching::tokenizer::tokenize;
use crate::matching::vector::{SparseVector, TermId};

/// Terms observed in one call's corpus, with ids assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ids: HashMap<String, TermId>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Returns the id of `term`, assigning the next free id if it is new.
    pub fn intern(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.ids.get(term) {
            return id;
        }
        let id = self.terms.len() as TermId;
        self.ids.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        id
    }

    pub fn id(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    /// Reverse lookup, used to explain scores.
    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Output of a vectorization pass: vectors in input order plus their vocabulary.
#[derive(Debug, Clone)]
pub struct Vectorized {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<SparseVector>,
}

/// Smoothed inverse document frequency. Always finite and ≥ 1 for `df ≤ n_docs`.
pub fn smoothed_idf(n_docs: usize, df: usize) -> f64 {
    ((n_docs as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}

/// Vectorizes `documents` against a vocabulary built from those same documents.
pub fn vectorize<S: AsRef<str>>(documents: &[S]) -> Vectorized {
    let mut vocabulary = Vocabulary::default();

    // Raw term counts per document, keyed by term id.
    let counts: Vec<HashMap<TermId, u32>> = documents
        .iter()
        .map(|doc| {
            let mut tf: HashMap<TermId, u32> = HashMap::new();
            for token in tokenize(doc.as_ref()) {
                *tf.entry(vocabulary.intern(&token)).or_insert(0) += 1;
            }
            tf
        })
        .collect();

    let mut df: HashMap<TermId, usize> = HashMap::new();
    for tf in &counts {
        let seen: HashSet<TermId> = tf.keys().copied().collect();
        for term in seen {
            *df.entry(term).or_insert(0) += 1;
        }
    }

    let n_docs = documents.len();
    let vectors: Vec<SparseVector> = counts
        .iter()
        .map(|tf| {
            let Some(&max_tf) = tf.values().max() else {
                return SparseVector::new();
            };
            let max_tf = f64::from(max_tf);
            tf.iter()
                .map(|(&term, &count)| {
                    let idf = smoothed_idf(n_docs, df.get(&term).copied().unwrap_or(0));
                    (term, f64::from(count) / max_tf * idf)
                })
                .collect()
        })
        .collect();

    Vectorized {
        vocabulary,
        vectors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight(v: &Vectorized, doc: usize, term: &str) -> Option<f64> {
        let id = v.vocabulary.id(term)?;
        v.vectors[doc].get(id)
    }

    #[test]
    fn test_one_vector_per_document_in_order() {
        let v = vectorize(&["rust engineer", "", "python engineer"]);
        assert_eq!(v.vectors.len(), 3);
        assert!(v.vectors[1].is_empty());
        assert!(weight(&v, 0, "rust").is_some());
        assert!(weight(&v, 0, "python").is_none());
        assert!(weight(&v, 2, "python").is_some());
    }

    #[test]
    fn test_vocabulary_ids_are_first_seen_order() {
        let v = vectorize(&["zebra apple", "apple mango"]);
        assert_eq!(v.vocabulary.id("zebra"), Some(0));
        assert_eq!(v.vocabulary.id("apple"), Some(1));
        assert_eq!(v.vocabulary.id("mango"), Some(2));
        assert_eq!(v.vocabulary.term(2), Some("mango"));
        assert_eq!(v.vocabulary.len(), 3);
    }

    #[test]
    fn test_idf_formula() {
        // "rust" appears in 2 of 3 docs, "kafka" in 1 of 3
        let v = vectorize(&["rust", "rust kafka", "golang"]);
        let rust_idf = (4.0_f64 / 3.0).ln() + 1.0;
        let kafka_idf = (4.0_f64 / 2.0).ln() + 1.0;
        assert!((weight(&v, 0, "rust").unwrap() - rust_idf).abs() < 1e-12);
        assert!((weight(&v, 1, "kafka").unwrap() - kafka_idf).abs() < 1e-12);
    }

    #[test]
    fn test_idf_positive_when_term_in_every_document() {
        let idf = smoothed_idf(4, 4);
        assert!((idf - 1.0).abs() < 1e-12);
        assert!(smoothed_idf(0, 0).is_finite());
    }

    #[test]
    fn test_tf_is_normalized_by_max_tf() {
        let v = vectorize(&["rust rust rust rust kafka"]);
        let idf = smoothed_idf(1, 1);
        assert!((weight(&v, 0, "rust").unwrap() - idf).abs() < 1e-12);
        assert!((weight(&v, 0, "kafka").unwrap() - 0.25 * idf).abs() < 1e-12);
    }

    #[test]
    fn test_document_frequency_counts_once_per_document() {
        let a = vectorize(&["rust rust rust", "golang"]);
        let b = vectorize(&["rust", "golang"]);
        assert_eq!(weight(&a, 0, "rust"), weight(&b, 0, "rust"));
    }

    #[test]
    fn test_stop_words_and_short_tokens_do_not_change_vectors() {
        let v = vectorize(&["the cat and a dog", "cat dog"]);
        assert_eq!(v.vectors[0], v.vectors[1]);
        assert_eq!(v.vocabulary.len(), 2);
    }

    #[test]
    fn test_all_weights_non_negative() {
        let v = vectorize(&[
            "senior rust engineer rust",
            "junior rust developer",
            "designer figma",
        ]);
        for vector in &v.vectors {
            assert!(vector.iter().all(|(_, w)| w >= 0.0));
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let docs = [
            "distributed systems engineer with kafka and rust",
            "rust kafka kubernetes terraform",
            "frontend react typescript",
        ];
        let a = vectorize(&docs);
        let b = vectorize(&docs);
        assert_eq!(a.vectors, b.vectors);
    }

    #[test]
    fn test_empty_corpus() {
        let docs: [&str; 0] = [];
        let v = vectorize(&docs);
        assert!(v.vectors.is_empty());
        assert!(v.vocabulary.is_empty());
    }
}
