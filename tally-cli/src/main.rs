//! `tally`: count, rank and optionally plot the word tokens of a text file.
//!
//! Usage:
//!   tally `<input>` [-lowercase] [-stem] [-lemmatize] [-stopwords] [-myopt]
//!         [-min_count N] [-top N] [--plot] [--logx] [--logy]
//!
//! Ranked `token<TAB>count` lines go to stdout. Warnings, errors and the
//! `[stats]` summary go to stderr. Set `RUST_LOG=debug` for stage details.

mod args;

use std::io::{self, BufWriter};
use std::process::ExitCode;

use tally_core::analyzer::Providers;
use tally_core::run::{load_text, Analysis};
use tally_types::Result;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .init();
}

fn execute(cli: &Cli) -> Result<()> {
    let text = load_text(&cli.input)?;
    let providers = Providers::english();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut diag = io::stderr().lock();

    let summary = Analysis::new(cli.run_options(), &providers).run(&text, &mut out, &mut diag)?;
    tracing::debug!(reported = summary.reported, "done");
    Ok(())
}
