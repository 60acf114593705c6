use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::NormalizedOffer;

/// Business rule deciding which hydrated offers are worth trading with.
///
/// Implementations receive the pair symbols so rules may depend on direction.
/// Closures with the same signature implement this trait.
pub trait ViabilityFilter: Send + Sync {
    /// Return the subset of `offers` deemed tradeable, preserving order.
    fn filter_viable(
        &self,
        want: &str,
        have: &str,
        offers: Vec<NormalizedOffer>,
    ) -> Vec<NormalizedOffer>;
}

impl<F> ViabilityFilter for F
where
    F: Fn(&str, &str, Vec<NormalizedOffer>) -> Vec<NormalizedOffer> + Send + Sync,
{
    fn filter_viable(
        &self,
        want: &str,
        have: &str,
        offers: Vec<NormalizedOffer>,
    ) -> Vec<NormalizedOffer> {
        self(want, have, offers)
    }
}

/// Keeps every offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ViabilityFilter for AcceptAll {
    fn filter_viable(
        &self,
        _want: &str,
        _have: &str,
        offers: Vec<NormalizedOffer>,
    ) -> Vec<NormalizedOffer> {
        offers
    }
}

/// Default viability rule.
///
/// Drops self-offers (listings whose contact is one of our own characters),
/// listings with less stock than `min_stock`, and listings with a zero rate.
#[derive(Debug, Clone)]
pub struct ViableOffers {
    own_characters: HashSet<String>,
    min_stock: u64,
}

impl Default for ViableOffers {
    fn default() -> Self {
        Self {
            own_characters: HashSet::new(),
            min_stock: 1,
        }
    }
}

impl ViableOffers {
    /// Create the default rule: no excluded characters, stock of at least one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude listings posted by one of these character names.
    #[must_use]
    pub fn excluding_characters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.own_characters.extend(names.into_iter().map(Into::into));
        self
    }

    /// Require at least `min_stock` units in stock.
    #[must_use]
    pub const fn min_stock(mut self, min_stock: u64) -> Self {
        self.min_stock = min_stock;
        self
    }

    fn is_viable(&self, offer: &NormalizedOffer) -> bool {
        !self.own_characters.contains(&offer.contact_ign)
            && offer.stock >= self.min_stock
            && offer.conversion_rate > Decimal::ZERO
    }
}

impl ViabilityFilter for ViableOffers {
    fn filter_viable(
        &self,
        _want: &str,
        _have: &str,
        offers: Vec<NormalizedOffer>,
    ) -> Vec<NormalizedOffer> {
        offers.into_iter().filter(|o| self.is_viable(o)).collect()
    }
}
