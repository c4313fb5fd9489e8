//! Token-level text normalization primitives.
//!
//! The pipeline stages for case folding and digit filtering are thin wrappers
//! around the functions here.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::fold_table::FOLDS;

#[rustfmt::skip]
const LOWERCASE_TABLE: [u8; 128] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x7b,0x7c,0x7d,0x7e,0x7f,
];

static DECIMAL_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{Nd}").expect("digit pattern is a valid regex"));

/// Returns `true` if `token` contains a decimal digit (`\p{Nd}`) in any script.
///
/// ASCII tokens are answered with a byte scan; the regex only runs on
/// non-ASCII input.
#[inline]
#[must_use]
pub fn has_decimal_digit(token: &str) -> bool {
    if token.is_ascii() {
        return token.bytes().any(|b| b.is_ascii_digit());
    }
    DECIMAL_DIGIT.is_match(token)
}

/// Full Unicode case folder.
///
/// Implements full case folding (CaseFolding.txt statuses C and F):
/// - ASCII letters via a lookup table
/// - Code points whose fold differs from their lowercase mapping (`ß` → `ss`,
///   final sigma, ligatures, iota subscripts, Cherokee) via the generated
///   fold table
/// - Everything else via [`char::to_lowercase`]
///
/// Folding is idempotent: folding an already folded string is a no-op.
///
/// # Examples
///
/// ```
/// use tally_core::analyzer::normalizer::CaseFolder;
///
/// let folder = CaseFolder::new();
/// assert_eq!(folder.fold("HELLO"), "hello");
/// assert_eq!(folder.fold("Straße"), "strasse");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CaseFolder;

impl CaseFolder {
    /// Creates a new case folder.
    pub const fn new() -> Self {
        Self
    }

    /// Folds `input` into an existing buffer.
    ///
    /// Clears the buffer first and reuses its capacity.
    #[inline]
    pub fn fold_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        for ch in input.chars() {
            if ch.is_ascii() {
                out.push(LOWERCASE_TABLE[ch as usize] as char);
            } else {
                fold_char(ch, out);
            }
        }
    }

    /// Folds `input`, borrowing it unchanged when it is already folded ASCII.
    #[inline]
    pub fn fold<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if input.is_ascii() && !input.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Borrowed(input);
        }
        let mut out = String::with_capacity(input.len());
        self.fold_into(input, &mut out);
        Cow::Owned(out)
    }
}

#[inline]
fn fold_char(c: char, out: &mut String) {
    match FOLDS.binary_search_by_key(&c, |&(from, _)| from) {
        Ok(i) => out.push_str(FOLDS[i].1),
        Err(_) => out.extend(c.to_lowercase()),
    }
}
