//! Command-line arguments.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tally_core::run::RunOptions;
use tally_types::{NormalizationConfig, PlotConfig, RankConfig};

/// Long flags that are also accepted with a single leading dash.
const SINGLE_DASH_FLAGS: &[&str] = &[
    "lowercase",
    "stem",
    "lemmatize",
    "stopwords",
    "myopt",
    "min_count",
    "top",
    "plot",
    "logx",
    "logy",
];

/// Count, rank and optionally plot the word tokens of a UTF-8 text file.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// UTF-8 text file to analyze
    pub input: PathBuf,

    /// Fold tokens to lowercase
    #[arg(long)]
    pub lowercase: bool,

    /// Reduce tokens to their stem
    #[arg(long)]
    pub stem: bool,

    /// Reduce tokens to their lemma (runs after stemming)
    #[arg(long)]
    pub lemmatize: bool,

    /// Drop English stopwords
    #[arg(long)]
    pub stopwords: bool,

    /// Drop tokens containing a digit
    #[arg(long)]
    pub myopt: bool,

    /// Only report tokens seen at least this many times
    #[arg(long = "min_count", value_name = "N", default_value_t = 1)]
    pub min_count: u64,

    /// Only report the N most frequent tokens (0 = all)
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub top: usize,

    /// Write a rank/frequency bar chart to plot.png
    #[arg(long)]
    pub plot: bool,

    /// Log-scale the rank axis of the plot
    #[arg(long)]
    pub logx: bool,

    /// Log-scale the count axis of the plot
    #[arg(long)]
    pub logy: bool,
}

impl Cli {
    /// Parses the process arguments, accepting single-dash long flags.
    pub fn parse_args() -> Self {
        Self::parse_from(rewrite_single_dash(std::env::args_os()))
    }

    /// Run options selected by the flags.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            normalization: NormalizationConfig {
                lowercase: self.lowercase,
                remove_stopwords: self.stopwords,
                drop_if_has_digit: self.myopt,
                stem: self.stem,
                lemmatize: self.lemmatize,
            },
            rank: RankConfig {
                min_count: self.min_count,
                top: self.top,
            },
            plot: self.plot.then(|| PlotConfig {
                log_x: self.logx,
                log_y: self.logy,
                ..PlotConfig::default()
            }),
        }
    }
}

/// Turns `-flag` and `-flag=value` into their `--` form for known flags.
///
/// Everything after a bare `--` is left alone.
pub fn rewrite_single_dash<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut rest_is_positional = false;
    args.into_iter()
        .map(|arg| {
            if rest_is_positional {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                rest_is_positional = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(body) if !body.starts_with('-') && is_single_dash_flag(body) => {
                    OsString::from(format!("-{s}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_flag(body: &str) -> bool {
    let name = body.split_once('=').map_or(body, |(name, _)| name);
    SINGLE_DASH_FLAGS.contains(&name)
}
