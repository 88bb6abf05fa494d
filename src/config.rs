//! Engine configuration: primality strategy and tunables.
//!
//! Loaded from a TOML file, then overridden field by field from command-line
//! flags. Every field has a default, so an empty file is a valid config:
//!
//! ```toml
//! strategy = "sqrt-trial-division"   # or "full-range"
//! segment_size = 67108864            # odd candidates per growth segment
//! parallel_threshold = 100000        # range width before trial division goes parallel
//! metrics_capacity = 1000            # timing records kept before the oldest is dropped
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::cache::PrimeCache;
use crate::error::{Result, SieveError};
use crate::metrics::DEFAULT_METRICS_CAPACITY;

/// How the engine decides primality for values in a query range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Sieve the cache all the way to the range end; answer by membership.
    FullRange,
    /// Sieve only to `isqrt(end)`; answer by trial division against the cache.
    #[default]
    SqrtTrialDivision,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FullRange => write!(f, "full-range"),
            Strategy::SqrtTrialDivision => write!(f, "sqrt-trial-division"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub strategy: Strategy,
    /// Odd candidates per growth segment; bounds sieve memory.
    pub segment_size: usize,
    /// Range widths above this run trial division on the rayon pool.
    pub parallel_threshold: u64,
    /// Timing records retained by the engine's metrics log.
    pub metrics_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            strategy: Strategy::default(),
            segment_size: PrimeCache::DEFAULT_SEGMENT_SIZE,
            parallel_threshold: 100_000,
            metrics_capacity: DEFAULT_METRICS_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn with_strategy(strategy: Strategy) -> Self {
        EngineConfig {
            strategy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.segment_size == 0 {
            return Err(SieveError::Config("segment_size must be greater than 0".into()));
        }
        if self.metrics_capacity == 0 {
            return Err(SieveError::Config(
                "metrics_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Parse an engine configuration from a TOML string.
pub fn parse_toml(content: &str) -> Result<EngineConfig> {
    let config: EngineConfig =
        toml::from_str(content).map_err(|e| SieveError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Parse an engine configuration from a TOML file path.
pub fn parse_toml_file(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SieveError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_toml(&content)
}
