//! flip-poe
//!
//! Connector that implements `OfferSource` against the Path of Exile official
//! trade API. An exchange search (stage one) returns ranked offer ids and a
//! query token; a listing fetch (stage two) hydrates a prefix of those ids.
//! Both stages go through one shared [`RateLimiter`].
#![warn(missing_docs)]

/// Transport seam and the production `reqwest` adapter.
pub mod adapter;
/// Connector builder.
pub mod builder;
/// Response parsing and listing extraction.
pub mod listing;

use std::sync::Arc;

use async_trait::async_trait;
use flip_core::{CurrencyTable, FlipError, NormalizedOffer, OfferQuery, OfferSource, QueryResult};
use flip_ratelimit::RateLimiter;

use crate::adapter::TradeApi;
pub use crate::builder::PoeConnectorBuilder;

pub(crate) const CONNECTOR_NAME: &str = "flip-poe";

/// Official trade API connector.
pub struct PoeConnector {
    api: Arc<dyn TradeApi>,
    limiter: Arc<RateLimiter>,
    currencies: Arc<CurrencyTable>,
}

impl PoeConnector {
    /// Static connector name.
    pub const NAME: &'static str = CONNECTOR_NAME;

    /// Assemble a connector from its collaborators.
    ///
    /// The same `limiter` gates both stages; share it with any other
    /// connector that talks to the same account or address.
    #[must_use]
    pub fn from_parts(
        api: Arc<dyn TradeApi>,
        limiter: Arc<RateLimiter>,
        currencies: Arc<CurrencyTable>,
    ) -> Self {
        Self {
            api,
            limiter,
            currencies,
        }
    }

    /// The limiter gating this connector's calls.
    #[must_use]
    pub const fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// The currency table used to resolve symbols.
    #[must_use]
    pub fn currencies(&self) -> &CurrencyTable {
        &self.currencies
    }

    /// Resolve both symbols of a pair into an exchange query.
    ///
    /// # Errors
    /// Returns `UnknownCurrency` for a symbol missing from the table.
    pub fn offer_query(
        &self,
        league: &str,
        want: &str,
        have: &str,
    ) -> Result<OfferQuery, FlipError> {
        Ok(OfferQuery {
            league: league.to_string(),
            want: self.currencies.resolve(want)?.to_string(),
            have: self.currencies.resolve(have)?.to_string(),
        })
    }
}

#[async_trait]
impl OfferSource for PoeConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn vendor(&self) -> &'static str {
        "Path of Exile Official Trade API"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "flip_poe::fetch_offer_ids", skip(self), err)
    )]
    async fn fetch_offer_ids(
        &self,
        league: &str,
        want: &str,
        have: &str,
    ) -> Result<QueryResult, FlipError> {
        let query = self.offer_query(league, want, have)?;
        let body = listing::exchange_body(&query);

        self.limiter.acquire().await;
        let raw = self.api.exchange(&query.league, &body).await?;
        let parsed = listing::parse_exchange_response(raw)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            offers = parsed.offer_ids.len(),
            query_id = %parsed.query_id,
            "exchange search answered"
        );
        Ok(parsed)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "flip_poe::fetch_offer_details",
            skip(self, offer_ids),
            fields(available = offer_ids.len()),
            err
        )
    )]
    async fn fetch_offer_details(
        &self,
        offer_ids: &[String],
        query_id: &str,
        limit: usize,
    ) -> Result<Vec<NormalizedOffer>, FlipError> {
        if offer_ids.is_empty() {
            return Ok(vec![]);
        }
        // Keep the provider's ranking: hydrate the first `limit` ids only.
        let ids = &offer_ids[..limit.min(offer_ids.len())];
        if ids.is_empty() {
            return Ok(vec![]);
        }

        self.limiter.acquire().await;
        let raw = self.api.fetch(ids, query_id).await?;
        listing::parse_fetch_response(raw)
    }
}
