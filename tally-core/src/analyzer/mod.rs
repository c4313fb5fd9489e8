//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Tokenizer**: Splits raw text into word tokens
//! - **Normalizer**: Case folding and digit detection primitives
//! - **Pipeline**: The ordered chain of optional normalization stages
//! - **Provider**: Pluggable stemmer, lemmatizer and stopword capabilities

mod fold_table;
pub mod lemmatizer;
pub mod normalizer;
pub mod pipeline;
pub mod provider;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::CaseFolder;
pub use pipeline::{NormalizationPipeline, Stage};
pub use provider::{Capability, Lemmatize, Providers, Stem};
pub use tokenizer::Tokenizer;
