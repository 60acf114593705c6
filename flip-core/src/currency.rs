use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::FlipError;

/// Currency symbols understood by the official trade exchange, with the code
/// the exchange search expects for each.
const TRADE_CURRENCIES: &[(&str, &str)] = &[
    ("alchemy", "alch"),
    ("alteration", "alt"),
    ("annulment", "annul"),
    ("augmentation", "aug"),
    ("blessed", "blessed"),
    ("chance", "chance"),
    ("chaos", "chaos"),
    ("chisel", "chisel"),
    ("chromatic", "chrom"),
    ("divine", "divine"),
    ("exalted", "exalted"),
    ("fusing", "fusing"),
    ("gcp", "gcp"),
    ("jeweller", "jew"),
    ("mirror", "mirror"),
    ("regal", "regal"),
    ("regret", "regret"),
    ("scouring", "scour"),
    ("silver", "silver"),
    ("transmutation", "transmute"),
    ("vaal", "vaal"),
    ("wisdom", "wisdom"),
];

/// Static lookup from currency symbol to provider code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyTable {
    codes: HashMap<String, String>,
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::from_entries(TRADE_CURRENCIES.iter().copied())
    }
}

impl CurrencyTable {
    /// Create a table with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Build a table from `(symbol, code)` entries. Later entries win.
    pub fn from_entries<I, S, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: Into<String>,
        C: Into<String>,
    {
        Self {
            codes: entries
                .into_iter()
                .map(|(s, c)| (s.into(), c.into()))
                .collect(),
        }
    }

    /// Add or replace a single mapping.
    #[must_use]
    pub fn with_entry(mut self, symbol: impl Into<String>, code: impl Into<String>) -> Self {
        self.codes.insert(symbol.into(), code.into());
        self
    }

    /// Resolve a currency symbol to its provider code.
    ///
    /// # Errors
    /// Returns `FlipError::UnknownCurrency` if `symbol` is not in the table.
    pub fn resolve(&self, symbol: &str) -> Result<&str, FlipError> {
        self.codes
            .get(symbol)
            .map(String::as_str)
            .ok_or_else(|| FlipError::unknown_currency(symbol))
    }

    /// Returns true if `symbol` resolves.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.codes.contains_key(symbol)
    }

    /// Known symbols, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.codes.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
