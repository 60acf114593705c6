use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use flip_core::{CurrencyPair, FlipError, NormalizedOffer, OfferSource, QueryResult};

/// Instruction for how a call should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(FlipError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
}

#[derive(Default)]
struct InternalState {
    search_rules: HashMap<CurrencyPair, MockBehavior<QueryResult>>,
    detail_rules: HashMap<String, MockBehavior<Vec<NormalizedOffer>>>,
    searches: Vec<(String, CurrencyPair)>,
    detail_requests: Vec<(Vec<String>, String, usize)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior of searches for `pair`.
    pub async fn set_search_behavior(
        &self,
        pair: CurrencyPair,
        behavior: MockBehavior<QueryResult>,
    ) {
        let mut guard = self.state.lock().await;
        guard.search_rules.insert(pair, behavior);
    }

    /// Set the behavior of detail fetches for the search `query_id`.
    pub async fn set_detail_behavior(
        &self,
        query_id: impl Into<String>,
        behavior: MockBehavior<Vec<NormalizedOffer>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.detail_rules.insert(query_id.into(), behavior);
    }

    /// Searches seen so far as `(league, pair)`, in call order.
    pub async fn searches(&self) -> Vec<(String, CurrencyPair)> {
        self.state.lock().await.searches.clone()
    }

    /// Detail fetches seen so far as `(ids, query_id, limit)`, in call order.
    pub async fn detail_requests(&self) -> Vec<(Vec<String>, String, usize)> {
        self.state.lock().await.detail_requests.clone()
    }

    /// Clear all configured behaviors and request logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.search_rules.clear();
        guard.detail_rules.clear();
        guard.searches.clear();
        guard.detail_requests.clear();
    }
}

/// A source that defers all behavior to an external controller.
///
/// Searches without a rule find nothing. Detail fetches without a rule
/// return no offers.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a new dynamic mock source and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn OfferSource>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn OfferSource>, controller)
    }
}

async fn play<T>(behavior: Option<MockBehavior<T>>, fallback: T) -> Result<T, FlipError> {
    match behavior {
        None => Ok(fallback),
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
    }
}

#[async_trait]
impl OfferSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    async fn fetch_offer_ids(
        &self,
        league: &str,
        want: &str,
        have: &str,
    ) -> Result<QueryResult, FlipError> {
        let pair = CurrencyPair::new(want, have);
        // Take a behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.searches.push((league.to_string(), pair.clone()));
            guard.search_rules.get(&pair).cloned()
        };
        play(behavior, QueryResult::default()).await
    }

    async fn fetch_offer_details(
        &self,
        offer_ids: &[String],
        query_id: &str,
        limit: usize,
    ) -> Result<Vec<NormalizedOffer>, FlipError> {
        if offer_ids.is_empty() {
            return Ok(vec![]);
        }
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .detail_requests
                .push((offer_ids.to_vec(), query_id.to_string(), limit));
            guard.detail_rules.get(query_id).cloned()
        };
        play(behavior, Vec::new()).await
    }
}
