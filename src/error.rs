//! Error types for cache configuration
//!
//! Cache operations themselves are total; only policy parsing and
//! environment loading can fail.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the configuration surface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Policy name does not match any known eviction policy
    #[error("Unknown cache policy: {0}")]
    UnknownPolicy(String),

    /// Configuration value could not be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidSetting {
        /// Setting (environment variable) name
        name: &'static str,
        /// Raw value that failed to parse
        value: String,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
