use std::sync::Arc;

use flip::{FlipError, OfferSource};

/// Return an offer source for the demos.
///
/// Uses the mock source when `FLIP_DEMOS_USE_MOCK` is set, otherwise the
/// official trade API limited to 4 calls per 5 seconds.
///
/// # Errors
/// Returns an error if the HTTP client cannot be constructed.
pub fn get_source() -> Result<Arc<dyn OfferSource>, FlipError> {
    if std::env::var("FLIP_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Source for CI) ---");
        Ok(Arc::new(flip_mock::MockSource::new()))
    } else {
        Ok(Arc::new(flip_poe::PoeConnector::rate_limited().build()?))
    }
}

/// League used by the demos, overridable with `FLIP_LEAGUE`.
#[must_use]
pub fn league() -> String {
    std::env::var("FLIP_LEAGUE").unwrap_or_else(|_| "Standard".to_string())
}
