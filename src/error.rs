//! Error types for sievecache.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SieveError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SieveError {
    /// A range bound passed to `generate` was zero or negative.
    #[error("Neither start ({start}) nor end ({end}) can be less than 1")]
    InvalidRange { start: i64, end: i64 },

    /// Engine configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_range_message_names_both_bounds() {
        let err = SieveError::InvalidRange {
            start: -10,
            end: 1000,
        };
        let msg = err.to_string();
        assert!(msg.contains("-10"), "{msg}");
        assert!(msg.contains("1000"), "{msg}");
    }

    #[test]
    fn config_message_is_prefixed() {
        let err = SieveError::Config("segment_size must be > 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: segment_size must be > 0"
        );
    }
}
