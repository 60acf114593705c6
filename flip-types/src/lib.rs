//! Flip-specific data transfer objects, configuration primitives and the shared error type.
#![warn(missing_docs)]

mod config;
mod error;
mod offer;
mod reports;

pub use config::{FetchConfig, RateLimitConfig, RateLimitState};
pub use error::FlipError;
pub use offer::{CurrencyPair, NormalizedOffer, OfferQuery, PairResult, QueryResult};
pub use reports::{FetchReport, PairFailure};
