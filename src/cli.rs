//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Contains engine
//! construction from layered configuration, the subcommand bodies, and rayon
//! configuration.

use anyhow::{Context, Result};
use sievecache::{config, repl, EngineConfig, PrimeQueryEngine};
use std::io::{self, Write};
use tracing::{info, warn};

use super::Cli;

// ── Configuration ───────────────────────────────────────────────

/// Resolve the engine configuration: TOML file first, then flag/env overrides.
fn resolve_config(cli: &Cli) -> Result<EngineConfig> {
    let mut cfg = match &cli.config {
        Some(path) => config::parse_toml_file(path)
            .with_context(|| format!("loading engine config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(strategy) = cli.strategy {
        cfg.strategy = strategy;
    }
    if let Some(segment_size) = cli.segment_size {
        cfg.segment_size = segment_size;
    }
    Ok(cfg)
}

pub fn build_engine(cli: &Cli) -> Result<PrimeQueryEngine> {
    let cfg = resolve_config(cli)?;
    info!(
        strategy = %cfg.strategy,
        segment_size = cfg.segment_size,
        parallel_threshold = cfg.parallel_threshold,
        metrics_capacity = cfg.metrics_capacity,
        "engine configured"
    );
    Ok(PrimeQueryEngine::with_config(cfg)?)
}

// ── Subcommands ─────────────────────────────────────────────────

pub fn run_range(engine: &PrimeQueryEngine, start: i64, end: i64, json: bool) -> Result<()> {
    let primes = engine.generate(start, end)?;
    let mut out = io::stdout().lock();
    if json {
        let doc = serde_json::json!({
            "start": start.min(end),
            "end": start.max(end),
            "strategy": engine.config().strategy,
            "count": primes.len(),
            "primes": primes,
            "metrics": engine.metrics(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        writeln!(out, "{}", repl::join_primes(&primes))?;
    }
    Ok(())
}

pub fn run_check(engine: &PrimeQueryEngine, value: i64, json: bool) -> Result<()> {
    let prime = engine.is_prime(value);
    let mut out = io::stdout().lock();
    if json {
        let doc = serde_json::json!({
            "value": value,
            "prime": prime,
            "strategy": engine.config().strategy,
        });
        writeln!(out, "{doc}")?;
    } else if prime {
        writeln!(out, "{value} is prime")?;
    } else {
        writeln!(out, "{value} is not prime")?;
    }
    Ok(())
}

pub fn run_repl(engine: &PrimeQueryEngine) -> Result<()> {
    let session = repl::Session::new(engine)?;
    session.run(io::stdin().lock(), io::stdout().lock())
}

// ── Rayon ───────────────────────────────────────────────────────

/// Size the global rayon pool used for parallel trial division.
pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}
