use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use flip_core::{CurrencyTable, FlipError, NormalizedOffer, OfferSource, QueryResult};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};

/// Mock source for CI-safe demos and tests. Serves deterministic offers from
/// static fixtures.
///
/// Symbols are checked against the default currency table, except for two
/// magic symbols: `FAIL` forces a transport failure and `THROTTLE` forces the
/// throttled-search error. Known pairs without fixtures yield no offers.
pub struct MockSource {
    currencies: CurrencyTable,
    latency: Duration,
    searches: AtomicUsize,
    detail_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            currencies: CurrencyTable::default(),
            latency: Duration::ZERO,
            searches: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Sleep this long inside every search, so concurrent callers overlap.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `fetch_offer_ids` calls so far.
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    /// Number of `fetch_offer_details` calls so far.
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// Highest number of searches observed in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn check_symbol(&self, symbol: &str) -> Result<(), FlipError> {
        match symbol {
            "FAIL" => Err(FlipError::transport("flip-mock", "forced failure: search")),
            "THROTTLE" => Err(FlipError::rate_limited("forced throttling: search")),
            s => self.currencies.resolve(s).map(|_| ()),
        }
    }

    async fn search(&self, want: &str, have: &str) -> Result<QueryResult, FlipError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.check_symbol(want)?;
        self.check_symbol(have)?;

        let count = fixtures::offers::by_pair(want, have).map_or(0, |offers| offers.len());
        Ok(QueryResult {
            offer_ids: (0..count).map(|i| format!("{want}:{have}:{i}")).collect(),
            query_id: format!("mock-{want}-{have}"),
        })
    }
}

fn offer_for_id(id: &str) -> Result<NormalizedOffer, FlipError> {
    let mut parts = id.splitn(3, ':');
    let (Some(want), Some(have), Some(idx)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FlipError::Fetch(format!("unknown offer id {id}")));
    };
    idx.parse::<usize>()
        .ok()
        .and_then(|i| fixtures::offers::by_pair(want, have)?.into_iter().nth(i))
        .ok_or_else(|| FlipError::Fetch(format!("unknown offer id {id}")))
}

#[async_trait]
impl OfferSource for MockSource {
    fn name(&self) -> &'static str {
        "flip-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn fetch_offer_ids(
        &self,
        _league: &str,
        want: &str,
        have: &str,
    ) -> Result<QueryResult, FlipError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let res = self.search(want, have).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        res
    }

    async fn fetch_offer_details(
        &self,
        offer_ids: &[String],
        _query_id: &str,
        limit: usize,
    ) -> Result<Vec<NormalizedOffer>, FlipError> {
        if offer_ids.is_empty() {
            return Ok(vec![]);
        }
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        offer_ids
            .iter()
            .take(limit)
            .map(|id| offer_for_id(id))
            .collect()
    }
}
