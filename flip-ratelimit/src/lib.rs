//! flip-ratelimit
//!
//! A sliding-window rate limiter. One instance is shared by every call a
//! connector makes, so the combined rate of all call sites stays under the
//! configured bound.

mod window;

pub use crate::window::RateLimiter;
pub use flip_types::{RateLimitConfig, RateLimitState};
