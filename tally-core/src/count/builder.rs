//! Aggregation: text in, frequency table and run statistics out.

use tally_types::RunStatistics;
use tracing::debug;

use crate::analyzer::pipeline::NormalizationPipeline;
use crate::analyzer::tokenizer::Tokenizer;
use crate::count::types::FrequencyTable;

/// Result of aggregating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Counts of every surviving token.
    pub table: FrequencyTable,
    /// Token totals for the run.
    pub stats: RunStatistics,
}

impl Aggregation {
    /// Tokens that survived every normalization stage.
    #[must_use]
    pub fn surviving_tokens(&self) -> u64 {
        self.table.total()
    }

    /// Tokens removed by a dropping stage.
    #[must_use]
    pub fn dropped_tokens(&self) -> u64 {
        self.stats.total_tokens.saturating_sub(self.surviving_tokens())
    }
}

/// Tokenizes, normalizes and counts a document.
///
/// `total_tokens` is measured at tokenizer output, before any stage runs, so
/// tokens dropped by the digit or stopword filters still count towards it.
pub struct Aggregator<'a, 'p> {
    tokenizer: Tokenizer,
    pipeline: &'a NormalizationPipeline<'p>,
}

impl<'a, 'p> Aggregator<'a, 'p> {
    /// Creates an aggregator over `pipeline`.
    pub fn new(pipeline: &'a NormalizationPipeline<'p>) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            pipeline,
        }
    }

    /// Builds the frequency table for `text`.
    pub fn aggregate(&self, text: &str) -> Aggregation {
        let mut table = FrequencyTable::new();
        let mut total_tokens = 0u64;

        for token in self.tokenizer.tokens(text) {
            total_tokens += 1;
            if let Some(normalized) = self.pipeline.normalize(token) {
                table.add(normalized);
            }
        }

        let stats = table.stats(total_tokens);
        let aggregation = Aggregation { table, stats };
        debug!(
            total = aggregation.stats.total_tokens,
            unique = aggregation.stats.unique_tokens,
            dropped = aggregation.dropped_tokens(),
            "aggregation complete"
        );
        aggregation
    }
}
