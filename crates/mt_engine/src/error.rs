//! Error types for the sampling engine.
//!
//! Every fallible operation validates its inputs before touching the
//! generator, so an `Err` never leaves the engine with a partially consumed
//! draw sequence.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors returned by [`MtEngine`](crate::MtEngine) operations.
///
/// # Variants
///
/// - `InvalidArgument`: malformed input (length mismatch, bad weights,
///   impossible unique count, empty collections, non-finite parameters)
/// - `Range`: a lower bound above its upper bound
/// - `Config`: wrapped configuration error
///
/// # Examples
///
/// ```
/// use mt_engine::EngineError;
///
/// let err = EngineError::Range { name: "randint", low: 9, high: 0 };
/// assert_eq!(format!("{}", err), "Invalid range for 'randint': 9 > 0");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// An argument violates the operation's contract.
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Description of the violation.
        reason: String,
    },

    /// Lower bound exceeds upper bound.
    #[error("Invalid range for '{name}': {low} > {high}")]
    Range {
        /// Parameter or operation name.
        name: &'static str,
        /// Lower bound supplied.
        low: i64,
        /// Upper bound supplied.
        high: i64,
    },

    /// Wrapped configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidArgument`].
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `Err(Range)` when `low > high`.
    pub(crate) fn check_range(name: &'static str, low: i64, high: i64) -> Result<()> {
        if low > high {
            return Err(Self::Range { name, low, high });
        }
        Ok(())
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
