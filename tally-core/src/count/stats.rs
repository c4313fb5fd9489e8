//! Statistics derived from a frequency table.

use tally_types::RunStatistics;

use crate::count::types::FrequencyTable;

impl FrequencyTable {
    /// Run statistics for this table, given the tokenizer's output count.
    pub fn stats(&self, total_tokens: u64) -> RunStatistics {
        RunStatistics {
            total_tokens,
            unique_tokens: self.len(),
        }
    }

    /// Approximate heap usage of the keys in bytes.
    pub fn key_bytes(&self) -> usize {
        self.counts.keys().map(String::len).sum()
    }
}

/// Share of the tokenizer's output that survived normalization, in `[0, 1]`.
///
/// Returns `1.0` for an empty document.
pub fn survival_ratio(stats: &RunStatistics, surviving: u64) -> f64 {
    if stats.total_tokens == 0 {
        return 1.0;
    }
    surviving as f64 / stats.total_tokens as f64
}
