//! Pluggable language capabilities.
//!
//! Stemming, lemmatization and stopword lists are supplied from outside the
//! pipeline and may be missing. Each one is wrapped in a [`Capability`] so
//! that absence is an explicit value the pipeline builder can act on,
//! instead of something discovered halfway through a run.

use std::borrow::Cow;
use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};
use rustc_hash::FxHashSet;
use tally_types::{CapabilityKind, Result, TallyError};

use crate::analyzer::lemmatizer::EnglishLemmatizer;
#[cfg(feature = "stop-words")]
use crate::analyzer::stopwords;

/// Reduces a token to its stem.
pub trait Stem {
    /// Returns the stem of `token`.
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// Reduces a token to its dictionary form.
pub trait Lemmatize {
    /// Returns the lemma of `token`.
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// A capability that is either present or missing with a reason.
#[derive(Debug, Clone)]
pub enum Capability<T> {
    /// The provider can be used.
    Available(T),
    /// The provider is missing; `reason` says why and how to fix it.
    Unavailable {
        /// Human-readable explanation.
        reason: String,
    },
}

impl<T> Capability<T> {
    /// Shorthand for [`Capability::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the provider is present.
    #[inline]
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// Returns the provider, or `None` if it is missing.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable { .. } => None,
        }
    }

    /// Returns the provider or an `OptionalDependencyUnavailable` error.
    pub fn require(&self, kind: CapabilityKind) -> Result<&T> {
        match self {
            Capability::Available(inner) => Ok(inner),
            Capability::Unavailable { reason } => Err(TallyError::OptionalDependencyUnavailable {
                capability: kind,
                reason: reason.clone(),
            }),
        }
    }
}

/// Snowball stemmer backed by `rust-stemmers`.
pub struct SnowballStemmer {
    stemmer: Stemmer,
    algorithm: Algorithm,
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl SnowballStemmer {
    /// Creates a stemmer for the given language.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            stemmer: Stemmer::create(algorithm),
            algorithm,
        }
    }

    /// Creates an English (Porter2) stemmer.
    pub fn english() -> Self {
        Self::new(Algorithm::English)
    }
}

impl Stem for SnowballStemmer {
    #[inline]
    fn stem<'a>(&self, token: &'a str) -> Cow<'a, str> {
        self.stemmer.stem(token)
    }
}

impl Lemmatize for EnglishLemmatizer {
    #[inline]
    fn lemmatize<'a>(&self, token: &'a str) -> Cow<'a, str> {
        self.lemma(token)
    }
}

/// The set of language capabilities injected into a run.
pub struct Providers {
    /// Stemmer used by the stem stage.
    pub stemmer: Capability<Box<dyn Stem>>,
    /// Lemmatizer used by the lemmatize stage.
    pub lemmatizer: Capability<Box<dyn Lemmatize>>,
    /// Stopword set used by the stopword stage.
    pub stopwords: Capability<FxHashSet<String>>,
}

impl fmt::Debug for Providers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Providers")
            .field("stemmer", &self.stemmer.is_available())
            .field("lemmatizer", &self.lemmatizer.is_available())
            .field("stopwords", &self.stopwords.get().map(FxHashSet::len))
            .finish()
    }
}

impl Default for Providers {
    fn default() -> Self {
        Self::english()
    }
}

impl Providers {
    /// English providers: Snowball stemmer, rule-based lemmatizer and the
    /// `stop-words` list when compiled in.
    pub fn english() -> Self {
        Self {
            stemmer: Capability::Available(Box::new(SnowballStemmer::english())),
            lemmatizer: Capability::Available(Box::new(EnglishLemmatizer::new())),
            stopwords: english_stopwords(),
        }
    }

    /// Every capability missing.
    pub fn unavailable(reason: &str) -> Self {
        Self {
            stemmer: Capability::unavailable(reason),
            lemmatizer: Capability::unavailable(reason),
            stopwords: Capability::unavailable(reason),
        }
    }

    /// Replaces the stopword provider.
    pub fn with_stopwords(mut self, stopwords: Capability<FxHashSet<String>>) -> Self {
        self.stopwords = stopwords;
        self
    }
}

#[cfg(feature = "stop-words")]
fn english_stopwords() -> Capability<FxHashSet<String>> {
    Capability::Available(stopwords::english())
}

#[cfg(not(feature = "stop-words"))]
fn english_stopwords() -> Capability<FxHashSet<String>> {
    Capability::unavailable(
        "stopword list not compiled in\n        Fix: rebuild with `--features stop-words`",
    )
}
