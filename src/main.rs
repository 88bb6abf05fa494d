//! # Main — CLI Entry Point
//!
//! Builds one `PrimeQueryEngine` from the layered configuration (TOML file,
//! then env/flags) and routes to a subcommand. With no subcommand the
//! interactive session starts.
//!
//! ## Global Options
//!
//! - `--config` / `SIEVECACHE_CONFIG`: TOML engine configuration file.
//! - `--strategy` / `SIEVECACHE_STRATEGY`: `full-range` or `sqrt-trial-division`.
//! - `--segment-size`: odd candidates per sieve growth segment.
//! - `--threads`: rayon thread pool size (defaults to all logical cores).
//! - `LOG_FORMAT=json`: JSON log lines instead of human-readable stderr output.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sievecache::Strategy;
use std::path::PathBuf;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "sievecache",
    about = "Find primes in a range with an incremental, cached sieve"
)]
struct Cli {
    /// Path to a TOML engine configuration file
    #[arg(long, env = "SIEVECACHE_CONFIG")]
    config: Option<PathBuf>,

    /// Primality strategy (overrides the config file)
    #[arg(long, env = "SIEVECACHE_STRATEGY", value_enum)]
    strategy: Option<Strategy>,

    /// Odd candidates per sieve growth segment (overrides the config file)
    #[arg(long)]
    segment_size: Option<usize>,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the primes in an inclusive range (bounds may be given in either order)
    Range {
        /// Start of the range (>= 1)
        #[arg(long, allow_negative_numbers = true)]
        start: i64,
        /// End of the range (>= 1)
        #[arg(long, allow_negative_numbers = true)]
        end: i64,
        /// Emit a JSON document instead of a comma-joined list
        #[arg(long)]
        json: bool,
    },
    /// Check whether a single value is prime
    Check {
        /// Value to test
        #[arg(long, allow_negative_numbers = true)]
        value: i64,
        /// Emit a JSON document instead of a sentence
        #[arg(long)]
        json: bool,
    },
    /// Interactive session: enter ranges like 7900-7920, `metrics`, or `exit`
    Repl,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize structured logging: LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    cli::configure_rayon(cli.threads);
    let engine = cli::build_engine(&cli)?;

    match &cli.command {
        Some(Commands::Range { start, end, json }) => cli::run_range(&engine, *start, *end, *json),
        Some(Commands::Check { value, json }) => cli::run_check(&engine, *value, *json),
        Some(Commands::Repl) | None => cli::run_repl(&engine),
    }
}
