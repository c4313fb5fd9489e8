//! Plain-text output of a ranked table.
//!
//! The reporter only formats. Filtering and ordering happen in the ranker.

use std::io::{self, Write};

use tally_types::{RankedEntry, RunStatistics};

/// Writes `token<TAB>count` lines, one per entry, in the given order.
pub fn write_entries<W: Write>(out: &mut W, entries: &[RankedEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    out.flush()
}

/// Writes the `[stats]` summary line.
pub fn write_stats<W: Write>(diag: &mut W, stats: &RunStatistics) -> io::Result<()> {
    writeln!(diag, "{stats}")?;
    diag.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_tab_delimited_lines() {
        let entries = [RankedEntry::new("the", 3, 1), RankedEntry::new("cat", 2, 2)];
        let mut out = Vec::new();
        write_entries(&mut out, &entries).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "the\t3\ncat\t2\n");
    }

    #[test]
    fn empty_entries_write_nothing() {
        let mut out = Vec::new();
        write_entries(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn stats_line() {
        let mut diag = Vec::new();
        let stats = RunStatistics {
            total_tokens: 4,
            unique_tokens: 3,
        };
        write_stats(&mut diag, &stats).unwrap();
        assert_eq!(
            String::from_utf8(diag).unwrap(),
            "[stats] total_tokens=4 unique_tokens=3\n"
        );
    }
}
