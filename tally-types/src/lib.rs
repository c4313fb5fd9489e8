//! Core types shared by the tally crates.
//!
//! This crate holds the plain value types that flow between the analysis
//! library and its front ends. Keeping them separate ensures:
//!
//! - **Cross-crate compatibility**: Core and CLI agree on one set of types
//! - **Clean boundaries**: No circular dependencies between crates
//! - **Cheap configuration**: Config records are `Copy` and built once per run

#![warn(missing_docs)]

use core::fmt;
use std::path::PathBuf;

/// Which normalization stages are enabled for a run.
///
/// The stage *order* is fixed by the pipeline and never depends on the order
/// in which these flags were set. The same configuration applies to every
/// token of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizationConfig {
    /// Full Unicode case folding.
    pub lowercase: bool,
    /// Drop tokens found in the active stopword set.
    pub remove_stopwords: bool,
    /// Drop tokens containing any decimal digit.
    pub drop_if_has_digit: bool,
    /// Replace tokens with their stem.
    pub stem: bool,
    /// Replace tokens with their lemma.
    pub lemmatize: bool,
}

impl NormalizationConfig {
    /// Configuration with every stage disabled: tokens pass through untouched.
    pub const fn identity() -> Self {
        Self {
            lowercase: false,
            remove_stopwords: false,
            drop_if_has_digit: false,
            stem: false,
            lemmatize: false,
        }
    }

    /// Returns `true` if no stage is enabled.
    #[inline]
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        !(self.lowercase
            || self.remove_stopwords
            || self.drop_if_has_digit
            || self.stem
            || self.lemmatize)
    }
}

/// Filtering applied by the ranker before and after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankConfig {
    /// Inclusive minimum count. Entries below it are discarded.
    pub min_count: u64,
    /// Keep only the first `top` entries after sorting. `0` means no limit.
    pub top: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self::all()
    }
}

impl RankConfig {
    /// Keeps every entry.
    pub const fn all() -> Self {
        Self {
            min_count: 1,
            top: 0,
        }
    }

    /// Keeps the `n` most frequent entries.
    pub const fn top(n: usize) -> Self {
        Self {
            min_count: 1,
            top: n,
        }
    }
}

/// File name of the plot, written to the current directory.
pub const DEFAULT_PLOT_PATH: &str = "plot.png";

/// Rank/frequency plot options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotConfig {
    /// Log-scale the rank axis.
    pub log_x: bool,
    /// Log-scale the count axis.
    pub log_y: bool,
    /// Output file. Overwritten if it exists.
    pub path: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            log_x: false,
            log_y: false,
            path: PathBuf::from(DEFAULT_PLOT_PATH),
            width: 1280,
            height: 960,
        }
    }
}

/// One row of the ranked frequency table.
///
/// Ranks are 1-based and contiguous; `count` is non-increasing as `rank`
/// grows. Only the ranker produces these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// Final, normalized token.
    pub token: String,
    /// Number of occurrences.
    pub count: u64,
    /// 1-based position in the ranked order.
    pub rank: usize,
}

impl RankedEntry {
    /// Creates a new entry.
    #[inline]
    pub fn new(token: impl Into<String>, count: u64, rank: usize) -> Self {
        Self {
            token: token.into(),
            count,
            rank,
        }
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.token, self.count)
    }
}

/// Summary figures of a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Tokens produced by the tokenizer, before any normalization stage.
    pub total_tokens: u64,
    /// Distinct keys in the final frequency table (before rank filtering).
    pub unique_tokens: usize,
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[stats] total_tokens={} unique_tokens={}",
            self.total_tokens, self.unique_tokens
        )
    }
}

/// Externally supplied capabilities that may be missing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    /// Stopword list provider.
    Stopwords,
    /// Stemmer.
    Stemmer,
    /// Lemmatizer.
    Lemmatizer,
    /// PNG plot renderer.
    Plot,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::Stopwords => "stopwords",
            CapabilityKind::Stemmer => "stemming",
            CapabilityKind::Lemmatizer => "lemmatization",
            CapabilityKind::Plot => "plotting",
        };
        f.write_str(name)
    }
}

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    /// Input file is missing or unreadable.
    #[error("cannot read input file {path}: {source}")]
    InputNotFound {
        /// Path as given on the command line.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid UTF-8.
    #[error("input file {path} is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidEncoding {
        /// Path as given on the command line.
        path: PathBuf,
        /// Length of the longest valid UTF-8 prefix.
        valid_up_to: usize,
    },

    /// A flag value was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested capability has no provider and no fallback.
    #[error("{capability} requested but unavailable: {reason}")]
    OptionalDependencyUnavailable {
        /// The missing capability.
        capability: CapabilityKind,
        /// Why it is missing and how to fix it.
        reason: String,
    },

    /// The plot could not be rendered or written.
    #[error("plot failed: {0}")]
    Plot(String),

    /// Writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TallyError {
    /// Process exit code for this error.
    ///
    /// Usage problems (bad arguments, missing capabilities) exit with `2`,
    /// everything else with `1`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            TallyError::InvalidArgument(_) | TallyError::OptionalDependencyUnavailable { .. } => 2,
            TallyError::InputNotFound { .. }
            | TallyError::InvalidEncoding { .. }
            | TallyError::Plot(_)
            | TallyError::Io(_) => 1,
        }
    }
}

/// Result alias used across the tally crates.
pub type Result<T> = core::result::Result<T, TallyError>;
