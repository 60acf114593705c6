use flip_types::{CurrencyPair, FetchReport, FlipError, PairFailure};

#[test]
fn only_throttling_and_transport_are_retryable() {
    assert!(FlipError::rate_limited("exchange search").is_retryable());
    assert!(FlipError::transport("poe-trade", "connection reset").is_retryable());

    assert!(!FlipError::unknown_currency("dust").is_retryable());
    assert!(!FlipError::Fetch("missing result".into()).is_retryable());
    assert!(!FlipError::InvalidArg("empty league".into()).is_retryable());
}

#[test]
fn unknown_currency_names_the_symbol() {
    let err = FlipError::unknown_currency("dust");
    assert_eq!(err.to_string(), "unknown currency: dust");
}

#[test]
fn report_with_failures_is_incomplete() {
    let mut report = FetchReport::default();
    assert!(report.is_complete());

    report.failures.push(PairFailure {
        pair: CurrencyPair::new("chaos", "exalted"),
        error: FlipError::Fetch("missing result".into()),
    });
    assert!(!report.is_complete());

    let json = serde_json::to_string(&report).expect("serialize report");
    let de: FetchReport = serde_json::from_str(&json).expect("deserialize report");
    assert_eq!(de, report);
}

#[test]
fn pair_display_reads_want_from_have() {
    assert_eq!(CurrencyPair::new("chaos", "exalted").to_string(), "chaos<-exalted");
}
