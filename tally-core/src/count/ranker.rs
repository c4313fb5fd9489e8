//! Ranking: filter, sort, truncate, number.

use core::cmp::Ordering;

use tally_types::{RankConfig, RankedEntry};

use crate::count::types::FrequencyTable;

/// Total order used for ranking: count descending, then token ascending by
/// code point.
///
/// UTF-8 byte order equals code point order, so plain `str` comparison is
/// enough. Keys in a table are unique, so no two entries compare equal.
#[inline(always)]
pub fn ranking_order(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Produces the ranked view of `table`.
///
/// 1. Drops entries with `count < min_count`
/// 2. Sorts by [`ranking_order`]
/// 3. Keeps the first `top` entries when `top > 0`
/// 4. Assigns contiguous 1-based ranks
///
/// The output is fully determined by the table contents and `config`.
#[must_use]
pub fn rank(table: &FrequencyTable, config: &RankConfig) -> Vec<RankedEntry> {
    let mut kept: Vec<(&str, u64)> = table
        .iter()
        .filter(|&(_, count)| count >= config.min_count)
        .collect();

    let limit = config.top;
    if limit > 0 && kept.len() > limit {
        kept.select_nth_unstable_by(limit, |a, b| ranking_order(*a, *b));
        kept.truncate(limit);
    }
    kept.sort_unstable_by(|a, b| ranking_order(*a, *b));

    kept.into_iter()
        .enumerate()
        .map(|(i, (token, count))| RankedEntry::new(token, count, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(tokens: &[&str]) -> FrequencyTable {
        tokens.iter().copied().collect()
    }

    fn pairs(entries: &[RankedEntry]) -> Vec<(&str, u64)> {
        entries.iter().map(|e| (e.token.as_str(), e.count)).collect()
    }

    fn sample() -> FrequencyTable {
        table(&["the", "cat", "sat", "on", "the", "mat", "the", "cat", "ran"])
    }

    #[test]
    fn count_desc_then_token_asc() {
        let ranked = rank(&sample(), &RankConfig::all());
        assert_eq!(
            pairs(&ranked),
            [
                ("the", 3),
                ("cat", 2),
                ("mat", 1),
                ("on", 1),
                ("ran", 1),
                ("sat", 1)
            ]
        );
    }

    #[test]
    fn ranks_are_contiguous_from_one() {
        let ranked = rank(&sample(), &RankConfig::all());
        for (i, e) in ranked.iter().enumerate() {
            assert_eq!(e.rank, i + 1);
        }
    }

    #[test]
    fn min_count_is_inclusive() {
        let c = RankConfig {
            min_count: 2,
            top: 0,
        };
        assert_eq!(pairs(&rank(&sample(), &c)), [("the", 3), ("cat", 2)]);
    }

    #[test]
    fn min_count_above_max_is_empty() {
        let c = RankConfig {
            min_count: 4,
            top: 0,
        };
        assert!(rank(&sample(), &c).is_empty());
    }

    #[test]
    fn top_truncates_after_sort() {
        let ranked = rank(&sample(), &RankConfig::top(3));
        assert_eq!(pairs(&ranked), [("the", 3), ("cat", 2), ("mat", 1)]);
    }

    #[test]
    fn top_zero_keeps_all() {
        assert_eq!(rank(&sample(), &RankConfig::top(0)).len(), 6);
    }

    #[test]
    fn top_larger_than_table_keeps_all() {
        assert_eq!(rank(&sample(), &RankConfig::top(100)).len(), 6);
    }

    #[test]
    fn top_equal_to_len_keeps_all() {
        assert_eq!(rank(&sample(), &RankConfig::top(6)).len(), 6);
    }

    #[test]
    fn min_count_then_top() {
        let c = RankConfig {
            min_count: 2,
            top: 1,
        };
        assert_eq!(pairs(&rank(&sample(), &c)), [("the", 3)]);
    }

    #[test]
    fn empty_table() {
        assert!(rank(&FrequencyTable::new(), &RankConfig::all()).is_empty());
    }

    #[test]
    fn ties_break_by_code_point() {
        let t = table(&["é", "z", "Z", "a"]);
        let ranked = rank(&t, &RankConfig::all());
        let tokens: Vec<_> = ranked.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(tokens, ["Z", "a", "z", "é"]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let t = sample();
        let first = rank(&t, &RankConfig::all());
        for _ in 0..10 {
            assert_eq!(rank(&t, &RankConfig::all()), first);
        }
    }

    #[test]
    fn ordering_is_total() {
        assert_eq!(ranking_order(("a", 2), ("b", 1)), Ordering::Less);
        assert_eq!(ranking_order(("b", 1), ("a", 1)), Ordering::Greater);
        assert_eq!(ranking_order(("a", 1), ("a", 1)), Ordering::Equal);
    }
}
