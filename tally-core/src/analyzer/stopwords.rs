//! Stopword lists.
//!
//! The English list is the NLTK list shipped by the `stop-words` crate when
//! the `stop-words` feature is enabled. [`FALLBACK`] is the small built-in list used when it
//! is not.

use rustc_hash::FxHashSet;

/// Built-in English stopwords, all lowercase.
pub const FALLBACK: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "else", "for", "to", "of", "in", "on",
    "at", "by", "is", "am", "are", "was", "were", "be", "been", "being", "it", "this", "that",
    "these", "those", "i", "you", "he", "she", "we", "they", "me", "him", "her", "us", "them",
    "my", "your", "his", "their",
];

/// Builds a stopword set from a word list.
pub fn from_list(words: &[&str]) -> FxHashSet<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

/// The built-in fallback set.
pub fn fallback() -> FxHashSet<String> {
    from_list(FALLBACK)
}

/// NLTK English stopwords from the `stop-words` crate.
#[cfg(feature = "stop-words")]
pub fn english() -> FxHashSet<String> {
    use stop_words::{get, LANGUAGE};

    get(LANGUAGE::English)
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
