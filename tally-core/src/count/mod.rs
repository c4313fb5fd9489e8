//! Counting and ranking.
//!
//! Single-threaded, single pass:
//! - [`Aggregator`] drives tokenizer and normalization pipeline over the
//!   document and fills a [`FrequencyTable`]
//! - [`rank`] turns the finished table into the ranked sequence shared by
//!   the text report and the plot
//!
//! The table is built completely before ranking starts and is never mutated
//! afterwards.

mod builder;
mod ranker;
mod stats;
mod types;

pub use builder::{Aggregation, Aggregator};
pub use ranker::{rank, ranking_order};
pub use stats::survival_ratio;
pub use types::FrequencyTable;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::pipeline::NormalizationPipeline;
    use crate::analyzer::provider::Providers;
    use crate::analyzer::tokenizer::Tokenizer;
    use proptest::prelude::*;
    use std::borrow::Cow;
    use tally_types::{NormalizationConfig, RankConfig, RunStatistics};

    const SAMPLE: &str = "The cat sat on the mat. The cat ran.";

    fn aggregate(text: &str, config: NormalizationConfig) -> Aggregation {
        let providers = Providers::english();
        let pipeline = NormalizationPipeline::build(&config, &providers).expect("pipeline");
        Aggregator::new(&pipeline).aggregate(text)
    }

    fn lowercase() -> NormalizationConfig {
        NormalizationConfig {
            lowercase: true,
            ..NormalizationConfig::identity()
        }
    }

    #[test]
    fn sample_with_lowercase() {
        let agg = aggregate(SAMPLE, lowercase());
        assert_eq!(
            agg.stats,
            RunStatistics {
                total_tokens: 9,
                unique_tokens: 6
            }
        );
        assert_eq!(agg.table.get("the"), 3);
        assert_eq!(agg.table.get("cat"), 2);
        assert_eq!(agg.table.get("The"), 0);
    }

    #[test]
    fn sample_without_lowercase_keeps_case() {
        let agg = aggregate(SAMPLE, NormalizationConfig::identity());
        assert_eq!(agg.table.get("The"), 2);
        assert_eq!(agg.table.get("the"), 1);
        assert_eq!(agg.stats.unique_tokens, 7);
    }

    #[test]
    fn digit_filter_counts_dropped_tokens_in_total() {
        let c = NormalizationConfig {
            drop_if_has_digit: true,
            ..NormalizationConfig::identity()
        };
        let agg = aggregate("Room 2020 is ready", c);
        assert_eq!(agg.stats.total_tokens, 4);
        assert_eq!(agg.stats.unique_tokens, 3);
        assert_eq!(agg.dropped_tokens(), 1);
        assert_eq!(agg.table.get("2020"), 0);
    }

    #[test]
    fn stopwords_counted_in_total_only() {
        let c = NormalizationConfig {
            lowercase: true,
            remove_stopwords: true,
            ..NormalizationConfig::identity()
        };
        let agg = aggregate(SAMPLE, c);
        assert_eq!(agg.stats.total_tokens, 9);
        assert_eq!(agg.table.get("the"), 0);
        assert_eq!(agg.table.get("cat"), 2);
    }

    #[test]
    fn empty_document() {
        let agg = aggregate("", lowercase());
        assert_eq!(agg.stats, RunStatistics::default());
        assert!(agg.table.is_empty());
        assert_eq!(survival_ratio(&agg.stats, agg.surviving_tokens()), 1.0);
    }

    #[test]
    fn table_stats_and_key_bytes() {
        let table: FrequencyTable = ["ab", "ab", "cde"].into_iter().collect();
        assert_eq!(table.stats(5).unique_tokens, 2);
        assert_eq!(table.key_bytes(), 5);
        assert_eq!(table.max_count(), 2);
    }

    #[test]
    fn survival_ratio_reflects_drops() {
        let c = NormalizationConfig {
            drop_if_has_digit: true,
            ..NormalizationConfig::identity()
        };
        let agg = aggregate("a1 b2 c d", c);
        assert_eq!(survival_ratio(&agg.stats, agg.surviving_tokens()), 0.5);
    }

    #[test]
    fn extend_with_owned_tokens() {
        let mut table = FrequencyTable::new();
        table.extend([Cow::Owned("x".to_string()), Cow::Borrowed("x")]);
        assert_eq!(table.get("x"), 2);
    }

    #[test]
    fn ranked_sample_end_to_end() {
        let agg = aggregate(SAMPLE, lowercase());
        let ranked = rank(&agg.table, &RankConfig::all());
        let lines: Vec<String> = ranked.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            ["the\t3", "cat\t2", "mat\t1", "on\t1", "ran\t1", "sat\t1"]
        );
    }

    #[test]
    fn min_count_above_max_keeps_unique_count() {
        let agg = aggregate(SAMPLE, lowercase());
        let c = RankConfig {
            min_count: 100,
            top: 0,
        };
        assert!(rank(&agg.table, &c).is_empty());
        assert_eq!(agg.stats.unique_tokens, 6);
    }

    proptest! {
        #[test]
        fn total_tokens_matches_tokenizer(text in "\\PC{0,200}") {
            let agg = aggregate(&text, NormalizationConfig {
                drop_if_has_digit: true,
                remove_stopwords: true,
                ..lowercase()
            });
            prop_assert_eq!(agg.stats.total_tokens, Tokenizer::new().count(&text));
        }

        #[test]
        fn counts_sum_to_surviving_tokens(text in "[a-zA-Z0-9 .,']{0,200}") {
            let c = NormalizationConfig {
                drop_if_has_digit: true,
                ..lowercase()
            };
            let providers = Providers::english();
            let pipeline = NormalizationPipeline::build(&c, &providers).expect("pipeline");
            let surviving = Tokenizer::new()
                .tokens(&text)
                .filter(|t| pipeline.normalize(t).is_some())
                .count() as u64;
            let agg = Aggregator::new(&pipeline).aggregate(&text);
            let ranked = rank(&agg.table, &RankConfig::all());
            let sum: u64 = ranked.iter().map(|e| e.count).sum();
            prop_assert_eq!(sum, surviving);
            prop_assert_eq!(ranked.len(), agg.stats.unique_tokens);
        }

        #[test]
        fn ranked_counts_never_increase(text in "[a-e ]{0,120}", top in 0usize..8, min in 1u64..4) {
            let agg = aggregate(&text, NormalizationConfig::identity());
            let ranked = rank(&agg.table, &RankConfig { min_count: min, top });
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].count >= pair[1].count);
                prop_assert_eq!(pair[0].rank + 1, pair[1].rank);
            }
            if top > 0 {
                prop_assert!(ranked.len() <= top);
            }
            prop_assert!(ranked.iter().all(|e| e.count >= min));
        }
    }
}
