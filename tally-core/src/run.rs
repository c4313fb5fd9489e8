//! One complete analysis run.
//!
//! [`Analysis`] wires the stages together in a fixed, linear order:
//!
//! 1. build the normalization pipeline (fails early on a missing capability)
//! 2. aggregate the document into a frequency table
//! 3. rank the table
//! 4. render the plot, if requested
//! 5. write the ranked lines and the `[stats]` line
//!
//! Nothing is written to the primary writer until every fallible step before
//! it has succeeded.

use std::io::Write;
use std::path::Path;

use tally_types::{NormalizationConfig, PlotConfig, RankConfig, Result, RunStatistics, TallyError};
use tracing::debug;

use crate::analyzer::pipeline::NormalizationPipeline;
use crate::analyzer::provider::Providers;
use crate::count::{rank, survival_ratio, Aggregator};
use crate::{plot, report};

/// Everything that shapes a run besides the text itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Enabled normalization stages.
    pub normalization: NormalizationConfig,
    /// Min-count and top-N filtering.
    pub rank: RankConfig,
    /// Plot settings; `None` skips the plot.
    pub plot: Option<PlotConfig>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Totals reported on the `[stats]` line.
    pub stats: RunStatistics,
    /// Tokens that survived normalization.
    pub surviving_tokens: u64,
    /// Lines written to the primary writer.
    pub reported: usize,
}

/// A configured analysis over a set of providers.
#[derive(Debug)]
pub struct Analysis<'p> {
    options: RunOptions,
    providers: &'p Providers,
}

impl<'p> Analysis<'p> {
    /// Creates an analysis. Nothing is validated until [`Analysis::run`].
    pub fn new(options: RunOptions, providers: &'p Providers) -> Self {
        Self { options, providers }
    }

    /// Options this analysis runs with.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Analyzes `text`, writing ranked lines to `out` and the summary line
    /// to `diag`.
    ///
    /// # Errors
    ///
    /// - `OptionalDependencyUnavailable` if stemming, lemmatization or
    ///   plotting is requested without a provider
    /// - `Plot` if the chart cannot be written
    /// - `Io` if either writer fails
    pub fn run<O: Write, D: Write>(&self, text: &str, out: &mut O, diag: &mut D) -> Result<RunSummary> {
        let pipeline = NormalizationPipeline::build(&self.options.normalization, self.providers)?;

        let aggregation = Aggregator::new(&pipeline).aggregate(text);
        let surviving_tokens = aggregation.surviving_tokens();
        debug!(
            survival = survival_ratio(&aggregation.stats, surviving_tokens),
            key_bytes = aggregation.table.key_bytes(),
            "table built"
        );

        let ranked = rank(&aggregation.table, &self.options.rank);

        if let Some(config) = &self.options.plot {
            plot::save(&ranked, config)?;
            debug!(path = %config.path.display(), "plot written");
        }

        report::write_entries(out, &ranked)?;
        report::write_stats(diag, &aggregation.stats)?;

        Ok(RunSummary {
            stats: aggregation.stats,
            surviving_tokens,
            reported: ranked.len(),
        })
    }
}

/// Reads `path` fully and decodes it as UTF-8.
///
/// # Errors
///
/// `InputNotFound` if the file cannot be read, `InvalidEncoding` if it is
/// not valid UTF-8.
pub fn load_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| TallyError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "input loaded");

    String::from_utf8(bytes).map_err(|e| TallyError::InvalidEncoding {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}
