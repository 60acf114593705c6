use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A requested exchange direction: acquire `want`, pay with `have`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency symbol the searcher wants to receive.
    pub want: String,
    /// Currency symbol the searcher offers in return.
    pub have: String,
}

impl CurrencyPair {
    /// Build a pair from two currency symbols.
    pub fn new(want: impl Into<String>, have: impl Into<String>) -> Self {
        Self {
            want: want.into(),
            have: have.into(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<-{}", self.want, self.have)
    }
}

/// Exchange search derived from a pair once both symbols are resolved to
/// provider codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferQuery {
    /// League the search is scoped to.
    pub league: String,
    /// Provider code of the wanted currency.
    pub want: String,
    /// Provider code of the offered currency.
    pub have: String,
}

/// Outcome of an exchange search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryResult {
    /// Matching offer ids in provider ranking order.
    pub offer_ids: Vec<String>,
    /// Correlation token required to fetch the listings of this search.
    pub query_id: String,
}

impl QueryResult {
    /// Returns true when the search matched no offers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offer_ids.is_empty()
    }
}

/// Compact view of a single exchange listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedOffer {
    /// Last character name of the listing account, used to whisper the seller.
    pub contact_ign: String,
    /// Units received per unit paid, rounded to 4 decimal places.
    pub conversion_rate: Decimal,
    /// Units of the received currency the seller has in stock.
    pub stock: u64,
}

/// Viable offers found for one pair in one fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairResult {
    /// Wanted currency symbol.
    pub want: String,
    /// Offered currency symbol.
    pub have: String,
    /// League the offers were found in.
    pub league: String,
    /// Offers that passed the viability filter.
    pub offers: Vec<NormalizedOffer>,
}

impl PairResult {
    /// The pair this result was fetched for.
    #[must_use]
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.want.clone(), self.have.clone())
    }
}
