use async_trait::async_trait;

use crate::{FlipError, NormalizedOffer, QueryResult};

/// A trade API that answers exchange searches in two stages.
///
/// Stage one runs the search and returns ranked offer ids with a query token;
/// stage two hydrates a prefix of those ids into listings. Implementations own
/// rate limiting for both stages.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Stable connector name used in logs and transport errors.
    fn name(&self) -> &'static str;

    /// Human-readable vendor name.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// Run an exchange search for `want` paid with `have` in `league`.
    ///
    /// `want` and `have` are currency symbols; the implementation resolves them
    /// to provider codes before contacting the provider.
    async fn fetch_offer_ids(
        &self,
        league: &str,
        want: &str,
        have: &str,
    ) -> Result<QueryResult, FlipError>;

    /// Hydrate the first `limit` ids of a search into normalized offers.
    ///
    /// An empty `offer_ids` slice yields an empty result without contacting the
    /// provider.
    async fn fetch_offer_details(
        &self,
        offer_ids: &[String],
        query_id: &str,
        limit: usize,
    ) -> Result<Vec<NormalizedOffer>, FlipError>;
}
