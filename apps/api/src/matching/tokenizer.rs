#![allow(dead_code)]
//! Tokenizer — lower-cases text and splits it into ASCII alphanumeric words.
//!
//! A word survives only if it is longer than two characters and is not in the
//! stop-word set. No stemming: "manage" and "managing" stay distinct tokens.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Words shorter than this are dropped.
const MIN_TOKEN_LEN: usize = 3;

/// English function words: articles, conjunctions, prepositions, pronouns,
/// "be" forms, demonstratives and common auxiliaries.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // articles
        "a", "an", "the",
        // conjunctions
        "and", "or", "but", "nor", "yet", "so", "if", "then", "than", "because", "while",
        "although", "though", "whether",
        // prepositions
        "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
        "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
        "of", "off", "over", "under", "again", "further", "within", "without", "upon",
        "across", "along", "among", "around", "onto", "toward", "towards", "via", "per",
        // pronouns
        "i", "me", "my", "mine", "myself", "we", "us", "our", "ours", "ourselves", "you",
        "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
        "her", "hers", "herself", "it", "its", "itself", "they", "them", "their", "theirs",
        "themselves", "who", "whom", "whose", "which", "what",
        // "be" forms
        "be", "am", "is", "are", "was", "were", "been", "being",
        // demonstratives
        "this", "that", "these", "those",
        // auxiliaries
        "do", "does", "did", "doing", "have", "has", "had", "having", "will", "would",
        "shall", "should", "can", "could", "may", "might", "must",
        // misc
        "not", "no", "as", "all", "any", "both", "each", "few", "more", "most", "other",
        "some", "such", "only", "own", "same", "too", "very", "just", "also", "there",
        "here", "when", "where", "why", "how",
    ]
    .into_iter()
    .collect()
});

/// Returns true if `word` belongs to the stop-word set.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Tokenizes `text` into normalized words, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| word.len() >= MIN_TOKEN_LEN && !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

/// Like [`tokenize`], but an absent text yields no tokens.
pub fn tokenize_opt(text: Option<&str>) -> Vec<String> {
    text.map(tokenize).unwrap_or_default()
}
