//! Sliding-window limiter implementation.

use std::collections::VecDeque;
use std::time::Duration;

use flip_types::{RateLimitConfig, RateLimitState};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Gate that admits at most `max_calls` acquisitions in any trailing `period`.
///
/// The window check and the recording of a new acquisition happen under one
/// async mutex. A caller that finds the window full keeps the mutex while it
/// sleeps until the oldest acquisition expires, so waiters are admitted in
/// arrival order (Tokio's mutex is fair).
///
/// There is no global instance; construct one at startup and share it with
/// `Arc`.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    window: Mutex<VecDeque<Instant>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::poe_default()
    }
}

impl RateLimiter {
    /// Create a limiter for `config`.
    ///
    /// A `max_calls` of zero is treated as one so that `acquire` always
    /// eventually proceeds.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        let max_calls = std::cmp::max(1, config.max_calls);
        let capacity = usize::try_from(max_calls).unwrap_or(usize::MAX).min(64);
        Self {
            config: RateLimitConfig {
                max_calls,
                period: config.period,
            },
            window: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Limiter configured for the official trade API (4 calls per 5 seconds).
    #[must_use]
    pub fn poe_default() -> Self {
        Self::new(RateLimitConfig::POE_TRADE)
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Wait until the window has room, then record an acquisition.
    pub async fn acquire(&self) {
        let mut window = self.window.lock().await;
        loop {
            let now = Instant::now();
            evict_expired(&mut window, now, self.config.period);

            let in_window = u64::try_from(window.len()).unwrap_or(u64::MAX);
            if in_window < self.config.max_calls {
                window.push_back(now);
                return;
            }

            // Full window: max_calls >= 1, so there is an oldest entry.
            let Some(&oldest) = window.front() else {
                continue;
            };
            let reopen_at = oldest + self.config.period;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                in_window,
                wait_ms = u64::try_from(reopen_at.saturating_duration_since(now).as_millis())
                    .unwrap_or(u64::MAX),
                "rate limit window full; waiting"
            );

            tokio::time::sleep_until(reopen_at).await;
        }
    }

    /// Snapshot of the window as seen now.
    ///
    /// Waits behind any caller currently sleeping inside `acquire`, which can
    /// take up to one full `period`. Use [`try_state`](Self::try_state) where
    /// that stall is not acceptable.
    pub async fn state(&self) -> RateLimitState {
        let mut window = self.window.lock().await;
        self.snapshot(&mut window)
    }

    /// Snapshot of the window, or `None` if the window is busy.
    ///
    /// Never waits. The window is busy while a caller holds it inside
    /// `acquire`, which is always the case when the window is full and a
    /// waiter is queued.
    pub fn try_state(&self) -> Option<RateLimitState> {
        let mut window = self.window.try_lock().ok()?;
        Some(self.snapshot(&mut window))
    }

    fn snapshot(&self, window: &mut VecDeque<Instant>) -> RateLimitState {
        let now = Instant::now();
        evict_expired(window, now, self.config.period);

        let reset_in = window.front().map_or(Duration::ZERO, |&oldest| {
            (oldest + self.config.period).saturating_duration_since(now)
        });
        RateLimitState {
            limit: self.config.max_calls,
            in_window: u64::try_from(window.len()).unwrap_or(u64::MAX),
            reset_in,
        }
    }
}

fn evict_expired(window: &mut VecDeque<Instant>, now: Instant, period: Duration) {
    while let Some(&oldest) = window.front() {
        if now.duration_since(oldest) >= period {
            window.pop_front();
        } else {
            break;
        }
    }
}
