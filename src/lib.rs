//! # sievecache — Incremental Cached Sieve of Eratosthenes
//!
//! Answers prime range queries and single primality checks from one growing
//! cache. Each engine owns its cache: the first query sieves up to the bound
//! it needs, later queries only sieve territory beyond the high-water mark.
//!
//! ```
//! use sievecache::PrimeQueryEngine;
//!
//! let engine = PrimeQueryEngine::new();
//! assert_eq!(engine.generate(7900, 7920).unwrap(), vec![7901, 7907, 7919]);
//! assert!(engine.is_prime(7919));
//! assert!(!engine.is_prime(-84));
//! ```

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod repl;
pub mod sieve;

pub use cache::{GrowthReport, KnownPrimes, PrimeCache};
pub use config::{EngineConfig, Strategy};
pub use engine::PrimeQueryEngine;
pub use error::{Result, SieveError};
pub use metrics::{OperationKind, TimingRecord};
