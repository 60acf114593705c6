use flip_core::{CurrencyPair, FlipError, PairResult};

use crate::Flip;
use crate::core::check_args;

impl Flip {
    /// Fetch up to `limit` viable offers for one pair.
    ///
    /// Runs the exchange search, hydrates the first `detail_limit` listings,
    /// applies the viability filter, and keeps the first `limit` survivors in
    /// provider ranking order. An empty search yields an empty result without
    /// a listing fetch.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty league or a zero limit, otherwise the
    /// first error of the search or listing fetch, unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "flip::fetch_for_pair",
            skip(self),
            fields(pair = %pair, source = self.source.name()),
            err
        )
    )]
    pub async fn fetch_for_pair(
        &self,
        league: &str,
        pair: &CurrencyPair,
        limit: usize,
    ) -> Result<PairResult, FlipError> {
        check_args(league, limit)?;

        let found = self
            .source
            .fetch_offer_ids(league, &pair.want, &pair.have)
            .await?;
        let hydrated = self
            .source
            .fetch_offer_details(&found.offer_ids, &found.query_id, self.cfg.detail_limit)
            .await?;
        #[cfg(feature = "tracing")]
        let hydrated_count = hydrated.len();

        let mut offers = self.filter.filter_viable(&pair.want, &pair.have, hydrated);
        offers.truncate(limit);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            found = found.offer_ids.len(),
            hydrated = hydrated_count,
            viable = offers.len(),
            "pair fetched"
        );

        Ok(PairResult {
            want: pair.want.clone(),
            have: pair.have.clone(),
            league: league.to_string(),
            offers,
        })
    }
}
