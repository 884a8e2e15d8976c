//! Error definitions
//!
//! This module provides error types for doublekit.

use serde_json::Value;
use thiserror::Error;

/// Main error type for doublekit
#[derive(Error, Debug)]
pub enum Error {
    /// A collecting-mode call matched no recorded expectation
    #[error("unexpected call to `{method}` with args {args}")]
    UnexpectedCall {
        /// Name of the method that was called
        method: String,
        /// Human-readable rendering of the actual arguments
        args: String,
    },

    /// An exact call-count expectation was not met
    #[error("expected `{method}` to be called exactly {expected} time(s), was called {actual}")]
    ExpectedExactly {
        /// Name of the method the expectation was recorded for
        method: String,
        /// Configured call count
        expected: usize,
        /// Observed call count
        actual: usize,
    },

    /// A lower-bound call-count expectation was not met
    #[error("expected `{method}` to be called at least {expected} time(s), was called {actual}")]
    ExpectedAtLeast {
        /// Name of the method the expectation was recorded for
        method: String,
        /// Configured minimum call count
        expected: usize,
        /// Observed call count
        actual: usize,
    },

    /// An upper-bound call-count expectation was not met
    #[error("expected `{method}` to be called no more than {expected} time(s), was called {actual}")]
    ExpectedNoMoreThan {
        /// Name of the method the expectation was recorded for
        method: String,
        /// Configured maximum call count
        expected: usize,
        /// Observed call count
        actual: usize,
    },

    /// Malformed expectation configuration
    #[error("invalid mock configuration: {0}")]
    InvalidConfiguration(String),

    /// A `Throw` strategy fired; carries the configured error value unmodified
    #[error("mock raised: {0}")]
    Thrown(Value),
}

impl Error {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    /// True for the count-mismatch family raised by expectation verification.
    #[must_use]
    pub fn is_count_mismatch(&self) -> bool {
        matches!(
            self,
            Self::ExpectedExactly { .. }
                | Self::ExpectedAtLeast { .. }
                | Self::ExpectedNoMoreThan { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
