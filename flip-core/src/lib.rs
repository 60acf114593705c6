//! flip-core
//!
//! Core traits and collaborators shared across the flip workspace.
//!
//! - `connector`: the `OfferSource` trait implemented by trade API connectors.
//! - `currency`: the symbol to provider-code lookup table.
//! - `filter`: the viability filter applied to hydrated offers.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Connectors are async and the orchestrator in the `flip` crate spawns its
//! workers on Tokio, so implementations must be `Send + Sync` and run under a
//! Tokio 1.x runtime.
#![warn(missing_docs)]

/// The `OfferSource` trait implemented by trade API connectors.
pub mod connector;
/// Currency symbol to provider-code mapping.
pub mod currency;
/// Viability filtering of normalized offers.
pub mod filter;

pub use connector::OfferSource;
pub use currency::CurrencyTable;
pub use filter::{AcceptAll, ViabilityFilter, ViableOffers};
pub use flip_types::*;
pub use rust_decimal::Decimal;
