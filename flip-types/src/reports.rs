use serde::{Deserialize, Serialize};

use crate::{CurrencyPair, FlipError, PairResult};

/// A pair whose pipeline failed, with the error that stopped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairFailure {
    /// Pair that failed.
    pub pair: CurrencyPair,
    /// Error returned by the first failing stage.
    pub error: FlipError,
}

/// Outcome of fetching offers for many pairs.
///
/// Pairs with no viable offers appear in neither list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchReport {
    /// Pairs with at least one viable offer, in completion order.
    pub results: Vec<PairResult>,
    /// Pairs whose pipeline returned an error.
    pub failures: Vec<PairFailure>,
}

impl FetchReport {
    /// Returns true if every dispatched pair completed without error.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
