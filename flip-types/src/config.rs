//! Configuration types shared across orchestrators and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a sliding-window rate limit.
///
/// At most `max_calls` acquisitions may fall within any trailing `period`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of calls admitted within a single window.
    pub max_calls: u64,
    /// Length of the trailing window.
    pub period: Duration,
}

impl RateLimitConfig {
    /// Limit used against the official trade API: 4 calls per 5 seconds.
    pub const POE_TRADE: Self = Self {
        max_calls: 4,
        period: Duration::from_secs(5),
    };
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::POE_TRADE
    }
}

/// Snapshot of a rate limiter at a point in time.
///
/// Taking one through the limiter's async `state` waits for any caller
/// parked inside `acquire`; `try_state` returns `None` instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitState {
    /// Configured maximum calls per window.
    pub limit: u64,
    /// Acquisitions still inside the trailing window.
    pub in_window: u64,
    /// Time until the oldest acquisition leaves the window (zero when empty).
    pub reset_in: Duration,
}

/// Limits and pool size used when fetching offers for many pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Offers kept per pair after filtering, unless a call overrides it.
    pub offers_per_pair: usize,
    /// Offer ids hydrated by the listing fetch for each pair.
    pub detail_limit: usize,
    /// Number of concurrent pair workers.
    pub workers: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            offers_per_pair: 3,
            detail_limit: 5,
            workers: 2,
        }
    }
}
