use std::sync::Arc;
use std::time::Duration;

use flip_core::{CurrencyTable, FlipError, RateLimitConfig};
use flip_ratelimit::RateLimiter;

use crate::PoeConnector;
use crate::adapter::{DEFAULT_BASE_URL, RealAdapter, TradeApi};

/// Builder for [`PoeConnector`].
///
/// Defaults: official host, 10 second request timeout, the default currency
/// table, and a fresh limiter of 4 calls per 5 seconds.
pub struct PoeConnectorBuilder {
    base_url: String,
    timeout: Duration,
    api: Option<Arc<dyn TradeApi>>,
    limiter: Option<Arc<RateLimiter>>,
    rate_limit: RateLimitConfig,
    currencies: CurrencyTable,
}

impl Default for PoeConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PoeConnectorBuilder {
    /// Create a builder with production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            api: None,
            limiter: None,
            rate_limit: RateLimitConfig::POE_TRADE,
            currencies: CurrencyTable::default(),
        }
    }

    /// Send requests to `base_url` instead of the official host.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-request timeout of the HTTP client.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom transport; `base_url` and `timeout` are then ignored.
    #[must_use]
    pub fn api(mut self, api: Arc<dyn TradeApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Share an existing limiter instead of creating one.
    ///
    /// Takes precedence over [`rate_limit`](Self::rate_limit).
    #[must_use]
    pub fn limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Configuration of the limiter created by `build`.
    #[must_use]
    pub const fn rate_limit(mut self, cfg: RateLimitConfig) -> Self {
        self.rate_limit = cfg;
        self
    }

    /// Replace the currency table.
    #[must_use]
    pub fn currencies(mut self, currencies: CurrencyTable) -> Self {
        self.currencies = currencies;
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<PoeConnector, FlipError> {
        let api = match self.api {
            Some(api) => api,
            None => Arc::new(RealAdapter::with_base_url(&self.base_url, self.timeout)?),
        };
        let limiter = self
            .limiter
            .unwrap_or_else(|| Arc::new(RateLimiter::new(self.rate_limit)));
        Ok(PoeConnector::from_parts(
            api,
            limiter,
            Arc::new(self.currencies),
        ))
    }
}

impl PoeConnector {
    /// Returns a builder with production defaults.
    #[must_use]
    pub fn builder() -> PoeConnectorBuilder {
        PoeConnectorBuilder::new()
    }

    /// Returns a builder limited to 4 calls per 5 seconds against the official host.
    ///
    /// This is the same as [`builder`](Self::builder); it exists to make the
    /// rate limit explicit at call sites.
    #[must_use]
    pub fn rate_limited() -> PoeConnectorBuilder {
        PoeConnectorBuilder::new().rate_limit(RateLimitConfig::POE_TRADE)
    }
}
