//! SSDTS command-line matcher
//!
//! Matches two timestamp series and prints a JSON report.
//!
//! ## Usage
//!
//! ```bash
//! ssdts-match recorder_a.txt recorder_b.txt --delta 2 --strategy delta-partitioned
//! cat b.json | ssdts-match a.txt - --pretty
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `SSDTS_DELTA`: Matching tolerance (default: 1)
//! - `SSDTS_STRATEGY`: Matching strategy (default: hybrid)
//! - `RUST_LOG`: Logging filter (default: warn)

mod error;
mod input;
mod logging;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use ssdts_core::{EngineConfig, MatchEngine, Strategy, Timestamp, DEFAULT_PARALLEL_THRESHOLD};
use tracing::info;

use error::{CliError, Result};

#[derive(Parser, Debug)]
#[command(name = "ssdts-match")]
#[command(about = "Match two source-sharing derivative time series")]
#[command(version)]
struct Args {
    /// File holding the first series ("-" for stdin)
    seq1: PathBuf,

    /// File holding the second series ("-" for stdin)
    seq2: PathBuf,

    /// Matched timestamps must differ by strictly less than this
    #[arg(short, long, env = "SSDTS_DELTA", default_value_t = 1)]
    delta: Timestamp,

    /// greedy, popping-greedy, dynamic, hybrid, vertical or delta-partitioned
    #[arg(short, long, env = "SSDTS_STRATEGY", default_value_t = Strategy::Hybrid)]
    strategy: Strategy,

    /// Per-cluster strategy for delta-partitioned matching
    #[arg(long, default_value_t = Strategy::Hybrid)]
    inner_strategy: Strategy,

    /// Segment count from which partitioned strategies run in parallel
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    /// Sort and deduplicate input instead of rejecting it
    #[arg(long)]
    sort: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Default log filter when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(&args.log_level);
    run(&args)?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    if args.seq1.as_os_str() == input::STDIN && args.seq2.as_os_str() == input::STDIN {
        return Err(CliError::MultipleStdin);
    }

    let seq1 = input::load_series(&args.seq1, args.sort)?;
    let seq2 = input::load_series(&args.seq2, args.sort)?;

    let engine = MatchEngine::with_config(EngineConfig {
        delta: args.delta,
        strategy: args.strategy,
        inner_strategy: args.inner_strategy,
        parallel_threshold: args.parallel_threshold,
    });

    let started = Instant::now();
    let report = engine.run_sequences(&seq1, &seq2);
    info!(
        strategy = %report.strategy,
        delta = report.delta,
        seq1_len = report.seq1_len,
        seq2_len = report.seq2_len,
        matched = report.matched,
        total_error = report.total_error,
        elapsed_us = started.elapsed().as_micros() as u64,
        "matching complete"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["ssdts-match", "a.txt", "b.txt"]).unwrap();
        assert_eq!(args.strategy, Strategy::Hybrid);
        assert_eq!(args.inner_strategy, Strategy::Hybrid);
        assert_eq!(args.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert!(!args.sort);
    }

    #[test]
    fn test_args_parse_strategy() {
        let args = Args::try_parse_from([
            "ssdts-match",
            "a.txt",
            "b.txt",
            "-d",
            "5",
            "-s",
            "delta_partitioned",
            "--inner-strategy",
            "dynamic",
        ])
        .unwrap();
        assert_eq!(args.delta, 5);
        assert_eq!(args.strategy, Strategy::DeltaPartitioned);
        assert_eq!(args.inner_strategy, Strategy::Dynamic);
    }

    #[test]
    fn test_args_reject_unknown_strategy() {
        let result =
            Args::try_parse_from(["ssdts-match", "a.txt", "b.txt", "--strategy", "fastest"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_both_stdin_rejected() {
        let args = Args::try_parse_from(["ssdts-match", "-", "-"]).unwrap();
        assert!(matches!(run(&args), Err(CliError::MultipleStdin)));
    }
}
