use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the flip workspace.
///
/// Per-pair failures (unknown currency, provider throttling, malformed
/// responses, transport issues) are reported with one of these variants so the
/// dispatcher can collect them beside successful pairs.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlipError {
    /// The currency symbol is not present in the configured currency table.
    #[error("unknown currency: {symbol}")]
    UnknownCurrency {
        /// Symbol that failed to resolve, e.g. "chaos".
        symbol: String,
    },

    /// The exchange search response lacked `result` or `id`.
    ///
    /// The provider answers throttled searches this way, so the caller may retry
    /// after the window has passed.
    #[error("rate limit exceeded: {what}")]
    RateLimitExceeded {
        /// Description of the call that was rejected.
        what: String,
    },

    /// The listing fetch response was malformed (missing `result`, missing
    /// listing fields, or a non-positive pay amount).
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Network or HTTP-level failure reported by a connector.
    #[error("{connector} transport failed: {msg}")]
    Transport {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl FlipError {
    /// Helper: build an `UnknownCurrency` error for a symbol.
    pub fn unknown_currency(symbol: impl Into<String>) -> Self {
        Self::UnknownCurrency {
            symbol: symbol.into(),
        }
    }

    /// Helper: build a `RateLimitExceeded` error describing the rejected call.
    pub fn rate_limited(what: impl Into<String>) -> Self {
        Self::RateLimitExceeded { what: what.into() }
    }

    /// Helper: build a `Transport` error with the connector name and message.
    pub fn transport(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if retrying the same call later may succeed.
    ///
    /// Nothing in this workspace retries automatically; callers decide.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. } | Self::Transport { .. })
    }
}
