//! Error types for simulation configuration.

use thiserror::Error;

/// A simulation configuration that cannot be applied.
///
/// Returned before any simulation state is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The max target string was empty.
    #[error("max target must not be empty")]
    EmptyTarget,

    /// The max target string was not valid hex.
    #[error("max target {value:?} is not valid hex: {source}")]
    InvalidTargetHex {
        value: String,
        #[source]
        source: hex::FromHexError,
    },

    /// The max target exceeds the supported width.
    #[error("max target has {digits} hex digits, at most {max} are supported")]
    TargetTooWide { digits: usize, max: usize },

    /// A zero max target can never be beaten.
    #[error("max target must be greater than zero")]
    ZeroTarget,

    /// A count or window that must be strictly positive was not.
    #[error("{field} must be a positive integer, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    /// A count that may be zero was negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i64 },

    /// A probability outside `[0, 1]` (or NaN).
    #[error("{field} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { field: &'static str, value: f64 },

    /// More bees than a single spawn may add.
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// Memory for new bees could not be reserved.
    #[error("cannot allocate room for {count} bees: {source}")]
    BeeAllocation {
        count: u64,
        #[source]
        source: std::collections::TryReserveError,
    },
}
