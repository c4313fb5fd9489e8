//! Word Tokenizer Module
//!
//! This module splits raw document text into word tokens. It is the first
//! stage of the analysis pipeline: everything downstream (normalization,
//! counting, ranking) operates on the slices it emits.
//!
//! ## What It Does
//!
//! Given raw input like `"The cat's hat, 2nd edition."`, it yields each word
//! in document order:
//!
//! ```text
//! The | cat's | hat | 2nd | edition
//! ```
//!
//! ## The Lexical Rule
//!
//! ```text
//! word  = [\p{Alphabetic}\p{M}\p{Nd}]+
//! token = word ( ['’] word )*
//! ```
//!
//! - **Word characters**: Unicode alphabetic characters, combining marks and
//!   decimal digits. Marks keep decomposed text such as `"cafe\u{301}"` in
//!   one token.
//! - **Connectors**: a single ASCII apostrophe or U+2019 between two runs of
//!   word characters joins them (`don't`, `rock'n'roll`). Apostrophes at the
//!   edges of a word are not part of it.
//! - **Separators**: everything else, including hyphens and underscores.
//!
//! Case and punctuation inside the token are left as found; folding is the
//! normalizer's job.
//!
//! ## Key Features
//!
//! - **Zero Allocation**: Tokens are slices of the original string
//! - **Lazy**: [`Tokenizer::tokens`] returns an iterator; call it again to restart
//! - **Total**: Never panics on valid UTF-8, whatever the script

use once_cell::sync::Lazy;
use regex::{Matches, Regex};

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{M}\p{Nd}]+(?:['’][\p{Alphabetic}\p{M}\p{Nd}]+)*")
        .expect("token pattern is a valid regex")
});

/// Splits raw text into word tokens.
///
/// Stateless: two calls on the same input always produce the same sequence.
///
/// ## Example
///
/// ```
/// use tally_core::analyzer::tokenizer::Tokenizer;
///
/// let tokenizer = Tokenizer::new();
/// let words: Vec<&str> = tokenizer.tokens("Don't panic!").collect();
///
/// assert_eq!(words, ["Don't", "panic"]);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Returns a lazy iterator over the tokens of `text`, left to right.
    #[inline]
    pub fn tokens<'t>(&self, text: &'t str) -> Tokens<'t> {
        Tokens {
            inner: TOKEN_RE.find_iter(text),
        }
    }

    /// Counts tokens without materializing them.
    #[inline]
    #[must_use]
    pub fn count(&self, text: &str) -> u64 {
        self.tokens(text).fold(0u64, |n, _| n + 1)
    }
}

/// Iterator returned by [`Tokenizer::tokens`].
#[derive(Debug)]
pub struct Tokens<'t> {
    inner: Matches<'static, 't>,
}

impl<'t> Iterator for Tokens<'t> {
    type Item = &'t str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|m| m.as_str())
    }
}

impl core::iter::FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<&str> {
        Tokenizer::new().tokens(input).collect()
    }

    #[test]
    fn single_word() {
        assert_eq!(collect("hello"), ["hello"]);
    }

    #[test]
    fn punctuation_separates() {
        assert_eq!(
            collect("The cat sat on the mat. The cat ran."),
            ["The", "cat", "sat", "on", "the", "mat", "The", "cat", "ran"]
        );
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn no_word_characters_emits_nothing() {
        assert!(collect("  ... --- !!! \n\t ").is_empty());
    }

    #[test]
    fn internal_apostrophe_joins() {
        assert_eq!(collect("don't stop"), ["don't", "stop"]);
        assert_eq!(collect("rock'n'roll"), ["rock'n'roll"]);
        assert_eq!(collect("it’s"), ["it’s"]);
    }

    #[test]
    fn edge_apostrophes_are_dropped() {
        assert_eq!(collect("'quoted' cats'"), ["quoted", "cats"]);
    }

    #[test]
    fn double_apostrophe_splits() {
        assert_eq!(collect("a''b"), ["a", "b"]);
    }

    #[test]
    fn hyphen_and_underscore_separate() {
        assert_eq!(collect("state-of-the_art"), ["state", "of", "the", "art"]);
    }

    #[test]
    fn digits_are_word_characters() {
        assert_eq!(collect("Room 2020, 3rd floor"), ["Room", "2020", "3rd", "floor"]);
    }

    #[test]
    fn combining_marks_stay_attached() {
        assert_eq!(collect("cafe\u{301} au lait"), ["cafe\u{301}", "au", "lait"]);
    }

    #[test]
    fn mixed_scripts() {
        assert_eq!(
            collect("Привет, мир! 你好 Ελλάδα"),
            ["Привет", "мир", "你好", "Ελλάδα"]
        );
    }

    #[test]
    fn emoji_separates() {
        assert_eq!(collect("hello🌍world"), ["hello", "world"]);
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        for text in Tokenizer::new().tokens(&input) {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        }
    }

    #[test]
    fn iterator_is_restartable() {
        let t = Tokenizer::new();
        let text = "one two three";
        let first: Vec<_> = t.tokens(text).collect();
        let second: Vec<_> = t.tokens(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn count_matches_iterator() {
        let text = "a b c, d'e - f";
        let t = Tokenizer::new();
        assert_eq!(t.count(text), t.tokens(text).count() as u64);
        assert_eq!(t.count(text), 5);
    }

    #[test]
    fn no_token_contains_whitespace() {
        let text = "tabs\tand\nnewlines\r\nand  spaces";
        for tok in collect(text) {
            assert!(!tok.chars().any(char::is_whitespace));
        }
    }

    proptest::proptest! {
        #[test]
        fn any_text_tokenizes(text in "\\PC{0,300}") {
            let t = Tokenizer::new();
            let tokens: Vec<&str> = t.tokens(&text).collect();
            proptest::prop_assert_eq!(tokens.len() as u64, t.count(&text));
            for tok in tokens {
                proptest::prop_assert!(!tok.is_empty());
                proptest::prop_assert!(text.contains(tok));
                proptest::prop_assert!(!tok.starts_with(['\'', '’']));
                proptest::prop_assert!(!tok.ends_with(['\'', '’']));
            }
        }
    }
}
