//! Throughput benchmark for the counting pipeline.
//!
//! Measures how fast a large UTF-8 file moves through each stage, so
//! regressions in the tokenizer regex or the normalization stages show up
//! as raw numbers.
//!
//! ## What It Benchmarks
//!
//! 1. **Tokenize**: regex token extraction only
//! 2. **Normalize**: tokenize plus the full normalization chain (digit
//!    filter, case folding, stopwords, stemming), no counting
//! 3. **Aggregate**: tokenize, normalize and count into a frequency table,
//!    then rank it
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/tally_bench /path/to/corpus.txt
//! ./target/release/tally_bench /path/to/corpus.txt aggregate
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Aggregate ===
//! --------------------------------
//! Mode        : Aggregate
//! Elapsed     : 0.812 s
//! Throughput  : 0.121 GiB/s
//! Tokens      : 17_402_113
//! Tokens/sec  : 21_431_174
//! Unique      : 211_540
//! --------------------------------
//! ```
//!
//! Build with `--release`; debug builds of the regex engine are far slower.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use tally_core::analyzer::{NormalizationPipeline, Providers, Tokenizer};
use tally_core::count::{rank, Aggregator};
use tally_core::run::load_text;
use tally_types::{NormalizationConfig, RankConfig};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

const BENCH_CONFIG: NormalizationConfig = NormalizationConfig {
    lowercase: true,
    remove_stopwords: true,
    drop_if_has_digit: true,
    stem: true,
    lemmatize: false,
};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let Some(path) = args.get(1) else {
        eprintln!("Usage: tally_bench <path> [tokenize|normalize|aggregate|all]");
        return ExitCode::from(2);
    };
    let mode = args.get(2).map_or("all", String::as_str);

    println!("Loading file...");
    let input = match load_text(Path::new(path)) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };
    println!("File size: {}\n", fmt_bytes(input.len() as u64));

    let providers = Providers::english();
    let pipeline = match NormalizationPipeline::build(&BENCH_CONFIG, &providers) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match mode {
        "tokenize" => bench_tokenize(&input),
        "normalize" => bench_normalize(&input, &pipeline),
        "aggregate" => bench_aggregate(&input, &pipeline),
        "all" => {
            bench_tokenize(&input);
            bench_normalize(&input, &pipeline);
            bench_aggregate(&input, &pipeline);
        }
        other => {
            eprintln!("unknown mode: {other}");
            return ExitCode::from(2);
        }
    }

    ExitCode::SUCCESS
}

fn bench_tokenize(input: &str) {
    let tokenizer = Tokenizer::new();

    println!("=== Tokenize ===");

    warmup(|| {
        std::hint::black_box(tokenizer.count(input));
    });

    let mut tokens = 0u64;
    let elapsed = measure(|| {
        tokens = tokenizer.count(input);
        std::hint::black_box(tokens);
    });

    print_perf("Tokenize", input.len(), elapsed, tokens, None);
}

fn bench_normalize(input: &str, pipeline: &NormalizationPipeline<'_>) {
    let tokenizer = Tokenizer::new();

    println!("=== Normalize ===");

    let run = || {
        let mut survived = 0u64;
        for token in tokenizer.tokens(input) {
            if let Some(t) = pipeline.normalize(token) {
                std::hint::black_box(&t);
                survived += 1;
            }
        }
        survived
    };

    warmup(|| {
        std::hint::black_box(run());
    });

    let mut tokens = 0u64;
    let elapsed = measure(|| {
        tokens = run();
    });

    print_perf("Normalize", input.len(), elapsed, tokens, None);
}

fn bench_aggregate(input: &str, pipeline: &NormalizationPipeline<'_>) {
    let aggregator = Aggregator::new(pipeline);

    println!("=== Aggregate ===");

    warmup(|| {
        std::hint::black_box(aggregator.aggregate(input));
    });

    let mut tokens = 0u64;
    let mut unique = 0usize;
    let elapsed = measure(|| {
        let aggregation = aggregator.aggregate(input);
        let ranked = rank(&aggregation.table, &RankConfig::all());
        tokens = aggregation.stats.total_tokens;
        unique = ranked.len();
    });

    print_perf("Aggregate", input.len(), elapsed, tokens, Some(unique));
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, tokens: u64, unique: Option<usize>) {
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    let gib = input_bytes as f64 / (1024.0 * 1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {label}");
    println!("Elapsed     : {secs:.3} s");
    println!("Throughput  : {:.3} GiB/s", gib / secs);
    println!("Tokens      : {}", fmt_count(tokens));
    println!("Tokens/sec  : {}", fmt_count((tokens as f64 / secs) as u64));
    if let Some(unique) = unique {
        println!("Unique      : {}", fmt_count(unique as u64));
    }
    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    match b {
        b if b >= GIB => format!("{:.2} GiB", b as f64 / GIB as f64),
        b if b >= MIB => format!("{:.2} MiB", b as f64 / MIB as f64),
        b if b >= KIB => format!("{:.2} KiB", b as f64 / KIB as f64),
        b => format!("{b} B"),
    }
}

/// `1234567` → `1_234_567`.
fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out
}
