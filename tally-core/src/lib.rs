//! Token frequency analysis for a single text document.
//!
//! ## What It Does
//!
//! Splits UTF-8 text into word tokens, runs them through an optional chain
//! of normalization stages, counts what survives and ranks the result by
//! frequency. The ranked table is written as `token<TAB>count` lines and can
//! also be drawn as a rank/frequency bar chart.
//!
//! ## Key Features
//!
//! - **Unicode tokenizer**: letters, combining marks and decimal digits,
//!   joined across internal apostrophes
//! - **Fixed stage order**: digit filter, case folding, stopwords, stemming,
//!   lemmatization; disabled stages are never constructed
//! - **Explicit capabilities**: stemmer, lemmatizer and stopword list are
//!   injected and may be reported as unavailable
//! - **Deterministic ranking**: count descending, then token by code point
//!
//! ## Example
//!
//! ```
//! use tally_core::analyzer::Providers;
//! use tally_core::run::{Analysis, RunOptions};
//! use tally_types::NormalizationConfig;
//!
//! let providers = Providers::english();
//! let options = RunOptions {
//!     normalization: NormalizationConfig { lowercase: true, ..Default::default() },
//!     ..Default::default()
//! };
//! let mut out = Vec::new();
//! let mut diag = Vec::new();
//! Analysis::new(options, &providers)
//!     .run("The cat sat on the mat. The cat ran.", &mut out, &mut diag)
//!     .unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("the\t3\ncat\t2\n"));
//! ```

pub mod analyzer;
pub mod count;
pub mod plot;
pub mod report;
pub mod run;

pub use count::{rank, Aggregation, Aggregator, FrequencyTable};
pub use run::{load_text, Analysis, RunOptions, RunSummary};
