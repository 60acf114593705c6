use std::sync::Arc;

use flip_core::{FlipError, OfferSource, ViabilityFilter, ViableOffers};
use flip_types::FetchConfig;

/// Orchestrator that fetches viable offers for currency pairs from one source.
///
/// Cloning is cheap; clones share the source (and therefore its rate limiter)
/// and the filter.
#[derive(Clone)]
pub struct Flip {
    pub(crate) source: Arc<dyn OfferSource>,
    pub(crate) filter: Arc<dyn ViabilityFilter>,
    pub(crate) cfg: FetchConfig,
}

/// Builder for constructing a `Flip` orchestrator with custom configuration.
pub struct FlipBuilder {
    source: Option<Arc<dyn OfferSource>>,
    filter: Arc<dyn ViabilityFilter>,
    cfg: FetchConfig,
}

impl Default for FlipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlipBuilder {
    /// Create a new builder with default limits.
    ///
    /// Starts with no source; register one via [`with_source`](Self::with_source).
    /// Defaults: 3 offers per pair, 5 listings hydrated per pair, 2 workers, and
    /// the [`ViableOffers`] filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            filter: Arc::new(ViableOffers::default()),
            cfg: FetchConfig::default(),
        }
    }

    /// Register the offer source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn OfferSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the viability filter applied to hydrated offers.
    #[must_use]
    pub fn filter(mut self, filter: Arc<dyn ViabilityFilter>) -> Self {
        self.filter = filter;
        self
    }

    /// Offers kept per pair when the caller does not pass a limit.
    #[must_use]
    pub const fn offers_per_pair(mut self, n: usize) -> Self {
        self.cfg.offers_per_pair = n;
        self
    }

    /// Listings hydrated per pair before filtering.
    ///
    /// Higher values leave more candidates after filtering but make each
    /// listing fetch heavier.
    #[must_use]
    pub const fn detail_limit(mut self, n: usize) -> Self {
        self.cfg.detail_limit = n;
        self
    }

    /// Number of concurrent pair workers.
    ///
    /// All workers share the source's rate limiter, so more workers do not
    /// raise throughput beyond the limit; they only overlap network latency.
    #[must_use]
    pub const fn workers(mut self, n: usize) -> Self {
        self.cfg.workers = n;
        self
    }

    /// Replace the whole fetch configuration.
    #[must_use]
    pub const fn fetch_config(mut self, cfg: FetchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Flip` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no source was registered or if any of the
    /// configured limits or the worker count is zero.
    pub fn build(self) -> Result<Flip, FlipError> {
        let Some(source) = self.source else {
            return Err(FlipError::InvalidArg(
                "no offer source registered; add one via with_source(...)".to_string(),
            ));
        };
        if self.cfg.workers == 0 {
            return Err(FlipError::InvalidArg(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.cfg.offers_per_pair == 0 || self.cfg.detail_limit == 0 {
            return Err(FlipError::InvalidArg(
                "offers_per_pair and detail_limit must be at least 1".to_string(),
            ));
        }

        Ok(Flip {
            source,
            filter: self.filter,
            cfg: self.cfg,
        })
    }
}

impl Flip {
    /// Start building a new `Flip` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use flip_poe::PoeConnector;
    ///
    /// let poe = Arc::new(PoeConnector::rate_limited().build()?);
    /// let flip = flip::Flip::builder()
    ///     .with_source(poe)
    ///     .offers_per_pair(3)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> FlipBuilder {
        FlipBuilder::new()
    }

    /// Effective fetch configuration.
    #[must_use]
    pub const fn config(&self) -> FetchConfig {
        self.cfg
    }

    /// Name of the registered source, for logs.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }
}

pub(crate) fn check_args(league: &str, limit: usize) -> Result<(), FlipError> {
    if league.trim().is_empty() {
        return Err(FlipError::InvalidArg("league must not be empty".to_string()));
    }
    if limit == 0 {
        return Err(FlipError::InvalidArg("limit must be at least 1".to_string()));
    }
    Ok(())
}
