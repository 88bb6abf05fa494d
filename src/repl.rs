//! # Repl — Interactive Range Session
//!
//! A line-oriented session over any `BufRead`/`Write` pair (stdin/stdout in
//! the binary, in-memory buffers in tests). Commands:
//!
//! | Input | Effect |
//! |-------|--------|
//! | `A-B` (decimal digits) | print the primes in `[A, B]` (either order) |
//! | `metrics` | print the engine's timing records |
//! | `exit` or end of input | end the session |
//!
//! Anything else prints a usage hint and the session continues.

use anyhow::Result;
use regex::Regex;
use std::io::{BufRead, Write};
use tracing::{debug, info};

use crate::engine::PrimeQueryEngine;
use crate::error::SieveError;

const RANGE_PATTERN: &str = r"^(\d+)-(\d+)$";

const BANNER: &str = "\
==========================================
==      sievecache Prime Number Engine  ==
==========================================
Directions:
  - Enter a number range (e.g. 7900-7920) to see the prime numbers within that range (inclusive).
  - Type metrics to see the runtime metrics of previous runs.
  - Type exit to quit.";

const INVALID_COMMAND: &str = "Invalid command.  Enter a number range (e.g. 7900-7920) or metrics to view basic runtime stats.";
const NO_METRICS: &str =
    "You must ask for a range of primes at least once before you can view metrics!";
const NON_POSITIVE_RANGE: &str = "The Prime Number range must not include 0 or negative numbers.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    Metrics,
    Range { start: i64, end: i64 },
    Invalid,
}

pub struct Session<'a> {
    engine: &'a PrimeQueryEngine,
    range_pattern: Regex,
}

impl<'a> Session<'a> {
    pub fn new(engine: &'a PrimeQueryEngine) -> Result<Self> {
        Ok(Session {
            engine,
            range_pattern: Regex::new(RANGE_PATTERN)?,
        })
    }

    /// Classify one input line. Numbers that do not fit in an `i64` are
    /// treated as an invalid command.
    pub fn parse_command(&self, line: &str) -> Command {
        let line = line.trim();
        match line {
            "exit" => return Command::Exit,
            "metrics" => return Command::Metrics,
            _ => {}
        }
        let Some(caps) = self.range_pattern.captures(line) else {
            return Command::Invalid;
        };
        match (caps[1].parse::<i64>(), caps[2].parse::<i64>()) {
            (Ok(start), Ok(end)) => Command::Range { start, end },
            _ => Command::Invalid,
        }
    }

    /// Run the session until `exit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{BANNER}")?;
        info!(strategy = %self.engine.config().strategy, "interactive session started");

        let mut lines = input.lines();
        loop {
            write!(output, "\n>> ")?;
            output.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;
            let command = self.parse_command(&line);
            debug!(?command, "session command");
            match command {
                Command::Exit => break,
                Command::Metrics => self.print_metrics(&mut output)?,
                Command::Range { start, end } => self.print_range(&mut output, start, end)?,
                Command::Invalid => writeln!(output, "{INVALID_COMMAND}")?,
            }
        }

        info!("interactive session ended");
        Ok(())
    }

    fn print_metrics<W: Write>(&self, output: &mut W) -> Result<()> {
        let records = self.engine.metrics();
        if records.is_empty() {
            writeln!(output, "{NO_METRICS}")?;
        } else {
            for record in &records {
                writeln!(output, "\t{record}")?;
            }
        }
        Ok(())
    }

    fn print_range<W: Write>(&self, output: &mut W, start: i64, end: i64) -> Result<()> {
        match self.engine.generate(start, end) {
            Ok(primes) if primes.is_empty() => {
                writeln!(output, "There are no Prime Numbers between {start} and {end}")?;
            }
            Ok(primes) => {
                writeln!(
                    output,
                    "The {} Prime Numbers Between {} and {} are:",
                    primes.len(),
                    start,
                    end
                )?;
                writeln!(output, "\t{}", join_primes(&primes))?;
            }
            Err(SieveError::InvalidRange { .. }) => writeln!(output, "{NON_POSITIVE_RANGE}")?,
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

/// Comma-join a prime list: `2, 3, 5`.
pub fn join_primes(primes: &[u64]) -> String {
    primes
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
