use std::sync::Arc;
use std::time::Duration;

use flip_core::{CurrencyPair, FlipError, NormalizedOffer, OfferSource, QueryResult};
use flip_mock::{DynamicMockSource, MockBehavior, MockSource};

#[tokio::test]
async fn magic_symbols_force_failures() {
    let mock = MockSource::new();

    let err = mock
        .fetch_offer_ids("Standard", "FAIL", "chaos")
        .await
        .unwrap_err();
    assert!(matches!(err, FlipError::Transport { .. }));

    let err = mock
        .fetch_offer_ids("Standard", "chaos", "THROTTLE")
        .await
        .unwrap_err();
    assert!(matches!(err, FlipError::RateLimitExceeded { .. }));
}

#[tokio::test]
async fn unknown_symbols_fail_like_the_real_connector() {
    let mock = MockSource::new();
    let err = mock
        .fetch_offer_ids("Standard", "mirror-shard", "chaos")
        .await
        .unwrap_err();
    assert_eq!(err, FlipError::unknown_currency("mirror-shard"));
}

#[tokio::test]
async fn pairs_without_fixtures_find_nothing() {
    let mock = MockSource::new();
    let found = mock
        .fetch_offer_ids("Standard", "jeweller", "fusing")
        .await
        .unwrap();
    assert!(found.is_empty());

    let offers = mock
        .fetch_offer_details(&found.offer_ids, &found.query_id, 5)
        .await
        .unwrap();
    assert!(offers.is_empty());
    assert_eq!(mock.detail_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn tracks_concurrent_searches() {
    let mock = Arc::new(MockSource::new().with_latency(Duration::from_millis(50)));
    let mut tasks = Vec::new();
    for _ in 0..3 {
        let mock = Arc::clone(&mock);
        tasks.push(tokio::spawn(async move {
            mock.fetch_offer_ids("Standard", "chaos", "exalted").await
        }));
    }
    for t in tasks {
        t.await.unwrap().unwrap();
    }
    assert_eq!(mock.searches(), 3);
    assert_eq!(mock.max_in_flight(), 3);
}

#[tokio::test]
async fn dynamic_mock_plays_configured_behaviors() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let pair = CurrencyPair::new("chaos", "exalted");
    controller
        .set_search_behavior(
            pair.clone(),
            MockBehavior::Return(QueryResult {
                offer_ids: vec!["a".into(), "b".into()],
                query_id: "q1".into(),
            }),
        )
        .await;
    let offer = NormalizedOffer {
        contact_ign: "Seller".into(),
        conversion_rate: flip_core::Decimal::from(3),
        stock: 4,
    };
    controller
        .set_detail_behavior("q1", MockBehavior::Return(vec![offer.clone()]))
        .await;

    let found = source
        .fetch_offer_ids("Standard", "chaos", "exalted")
        .await
        .unwrap();
    let offers = source
        .fetch_offer_details(&found.offer_ids, &found.query_id, 5)
        .await
        .unwrap();
    assert_eq!(offers, vec![offer]);

    assert_eq!(
        controller.searches().await,
        vec![("Standard".to_string(), pair)]
    );
    assert_eq!(
        controller.detail_requests().await,
        vec![(vec!["a".to_string(), "b".to_string()], "q1".to_string(), 5)]
    );
}

#[tokio::test]
async fn dynamic_mock_fails_on_request() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    controller
        .set_search_behavior(
            CurrencyPair::new("divine", "chaos"),
            MockBehavior::Fail(FlipError::rate_limited("search")),
        )
        .await;

    let err = source
        .fetch_offer_ids("Standard", "divine", "chaos")
        .await
        .unwrap_err();
    assert_eq!(err, FlipError::rate_limited("search"));

    controller.clear_all_behaviors().await;
    let found = source
        .fetch_offer_ids("Standard", "divine", "chaos")
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test(start_paused = true)]
async fn dynamic_mock_can_hang() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    controller
        .set_search_behavior(CurrencyPair::new("chaos", "exalted"), MockBehavior::Hang)
        .await;

    let res = tokio::time::timeout(
        Duration::from_secs(1),
        source.fetch_offer_ids("Standard", "chaos", "exalted"),
    )
    .await;
    assert!(res.is_err());
}
