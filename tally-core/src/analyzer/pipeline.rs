//! Normalization pipeline.
//!
//! A [`NormalizationPipeline`] is a fixed, ordered list of [`Stage`]s built
//! once from a [`NormalizationConfig`]. Each stage either rewrites a token or
//! drops it; a drop ends processing for that token.
//!
//! Stage order never depends on how the configuration was assembled:
//!
//! 1. Digit filter: drop tokens containing any decimal digit
//! 2. Lowercase: full Unicode case folding
//! 3. Stopwords: drop members of the active stopword set (case-sensitive)
//! 4. Stem
//! 5. Lemmatize
//!
//! Disabled stages are simply not constructed.

use std::borrow::Cow;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tally_types::{CapabilityKind, NormalizationConfig, Result};
use tracing::{debug, warn};

use crate::analyzer::normalizer::{has_decimal_digit, CaseFolder};
use crate::analyzer::provider::{Capability, Lemmatize, Providers, Stem};
use crate::analyzer::stopwords;

/// Maximum number of stages a pipeline can hold.
pub const MAX_STAGES: usize = 5;

/// One normalization step.
pub trait Stage {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrites `token`, or returns `None` to drop it.
    fn apply<'a>(&self, token: Cow<'a, str>) -> Option<Cow<'a, str>>;
}

/// Drops tokens that contain a decimal digit.
#[derive(Debug, Default, Clone, Copy)]
pub struct DigitFilter;

impl Stage for DigitFilter {
    fn name(&self) -> &'static str {
        "digit-filter"
    }

    #[inline]
    fn apply<'a>(&self, token: Cow<'a, str>) -> Option<Cow<'a, str>> {
        if has_decimal_digit(&token) {
            None
        } else {
            Some(token)
        }
    }
}

/// Case-folds tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lowercase {
    folder: CaseFolder,
}

impl Stage for Lowercase {
    fn name(&self) -> &'static str {
        "lowercase"
    }

    #[inline]
    fn apply<'a>(&self, token: Cow<'a, str>) -> Option<Cow<'a, str>> {
        Some(match token {
            Cow::Borrowed(s) => self.folder.fold(s),
            Cow::Owned(s) => Cow::Owned(self.folder.fold(&s).into_owned()),
        })
    }
}

/// Drops tokens found in a stopword set.
#[derive(Debug, Clone)]
pub struct StopwordFilter<'p> {
    stopwords: Cow<'p, FxHashSet<String>>,
}

impl<'p> StopwordFilter<'p> {
    /// Creates a filter over `stopwords`.
    pub fn new(stopwords: Cow<'p, FxHashSet<String>>) -> Self {
        Self { stopwords }
    }

    /// Number of words in the active set.
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Returns `true` if the active set is empty.
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

impl Stage for StopwordFilter<'_> {
    fn name(&self) -> &'static str {
        "stopwords"
    }

    #[inline]
    fn apply<'a>(&self, token: Cow<'a, str>) -> Option<Cow<'a, str>> {
        if self.stopwords.contains(token.as_ref()) {
            None
        } else {
            Some(token)
        }
    }
}

/// Replaces tokens with their stem.
pub struct StemStage<'p> {
    stemmer: &'p dyn Stem,
}

impl Stage for StemStage<'_> {
    fn name(&self) -> &'static str {
        "stem"
    }

    #[inline]
    fn apply<'a>(&self, token: Cow<'a, str>) -> Option<Cow<'a, str>> {
        Some(rewrite(token, |s| self.stemmer.stem(s)))
    }
}

/// Replaces tokens with their lemma.
pub struct LemmatizeStage<'p> {
    lemmatizer: &'p dyn Lemmatize,
}

impl Stage for LemmatizeStage<'_> {
    fn name(&self) -> &'static str {
        "lemmatize"
    }

    #[inline]
    fn apply<'a>(&self, token: Cow<'a, str>) -> Option<Cow<'a, str>> {
        Some(rewrite(token, |s| self.lemmatizer.lemmatize(s)))
    }
}

/// Applies a borrowing rewrite to a token that may itself be borrowed or owned.
#[inline]
fn rewrite<'a, F>(token: Cow<'a, str>, f: F) -> Cow<'a, str>
where
    F: for<'b> Fn(&'b str) -> Cow<'b, str>,
{
    match token {
        Cow::Borrowed(s) => f(s),
        Cow::Owned(s) => {
            let changed = match f(&s) {
                Cow::Borrowed(out) if out == s => None,
                out => Some(out.into_owned()),
            };
            Cow::Owned(changed.unwrap_or(s))
        }
    }
}

/// The ordered chain of enabled stages.
pub struct NormalizationPipeline<'p> {
    stages: SmallVec<[Box<dyn Stage + 'p>; MAX_STAGES]>,
}

impl<'p> NormalizationPipeline<'p> {
    /// Builds the pipeline for `config`, borrowing capabilities from `providers`.
    ///
    /// # Errors
    ///
    /// Returns `OptionalDependencyUnavailable` if stemming or lemmatization is
    /// enabled but its provider is missing. A missing stopword provider is not
    /// an error: the built-in list is used and a warning is logged once.
    pub fn build(config: &NormalizationConfig, providers: &'p Providers) -> Result<Self> {
        let mut stages: SmallVec<[Box<dyn Stage + 'p>; MAX_STAGES]> = SmallVec::new();

        if config.drop_if_has_digit {
            stages.push(Box::new(DigitFilter));
        }

        if config.lowercase {
            stages.push(Box::new(Lowercase::default()));
        }

        if config.remove_stopwords {
            let set = match &providers.stopwords {
                Capability::Available(set) => Cow::Borrowed(set),
                Capability::Unavailable { reason } => {
                    warn!(
                        "stopword provider unavailable ({reason}); \
                         falling back to the built-in stopword list"
                    );
                    Cow::Owned(stopwords::fallback())
                }
            };
            stages.push(Box::new(StopwordFilter::new(set)));
        }

        if config.stem {
            let stemmer = providers.stemmer.require(CapabilityKind::Stemmer)?;
            stages.push(Box::new(StemStage {
                stemmer: &**stemmer,
            }));
        }

        if config.lemmatize {
            let lemmatizer = providers.lemmatizer.require(CapabilityKind::Lemmatizer)?;
            stages.push(Box::new(LemmatizeStage {
                lemmatizer: &**lemmatizer,
            }));
        }

        let pipeline = Self { stages };
        debug!(stages = ?pipeline.stage_names(), "normalization pipeline built");
        Ok(pipeline)
    }

    /// A pipeline with no stages.
    pub fn identity() -> Self {
        Self {
            stages: SmallVec::new(),
        }
    }

    /// Runs `token` through every stage. `None` means the token was dropped.
    #[inline]
    pub fn normalize<'a>(&self, token: &'a str) -> Option<Cow<'a, str>> {
        let mut current = Cow::Borrowed(token);
        for stage in &self.stages {
            current = stage.apply(current)?;
        }
        Some(current)
    }

    /// Names of the enabled stages, in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Number of enabled stages.
    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no stage is enabled.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
