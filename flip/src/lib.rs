//! Flip fetches currency-exchange offers from the Path of Exile trade API.
//!
//! Overview
//! - A source implementing `flip_core::OfferSource` answers the two-stage
//!   lookup: an exchange search returning ranked offer ids, then a listing
//!   fetch hydrating a prefix of those ids.
//! - The orchestrator runs that pipeline per currency pair, applies a
//!   viability filter, and keeps the best few offers.
//! - Many pairs are dispatched to a small fixed pool of workers. All calls go
//!   through the source's rate limiter, so the pool overlaps latency without
//!   exceeding the provider's limit.
//!
//! Key behaviors and trade-offs
//! - Per-pair failure isolation: a failing pair is reported in
//!   `FetchReport::failures` and the rest of the batch continues.
//! - Pairs without viable offers are dropped from the report.
//! - No retries: `FlipError::is_retryable` tells callers which failures may
//!   succeed on a later cycle.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use flip::{CurrencyPair, Flip};
//! use flip_poe::PoeConnector;
//!
//! let poe = Arc::new(PoeConnector::rate_limited().build()?);
//! let flip = Flip::builder().with_source(poe).build()?;
//! let report = flip
//!     .fetch_offers(
//!         "Standard",
//!         &[CurrencyPair::new("chaos", "exalted"), CurrencyPair::new("divine", "chaos")],
//!     )
//!     .await?;
//! for pair in &report.results {
//!     println!("{} <- {}: {} offers", pair.want, pair.have, pair.offers.len());
//! }
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use core::{Flip, FlipBuilder};

// Re-export core types for convenience
pub use flip_core::{
    AcceptAll, CurrencyPair, CurrencyTable, Decimal, FetchConfig, FetchReport, FlipError,
    NormalizedOffer, OfferSource, PairFailure, PairResult, QueryResult, RateLimitConfig,
    ViabilityFilter, ViableOffers,
};
