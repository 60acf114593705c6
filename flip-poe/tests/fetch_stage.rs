use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use flip_core::{Decimal, FlipError, OfferSource, RateLimitConfig};
use flip_poe::PoeConnector;
use flip_poe::adapter::TradeApi;
use flip_ratelimit::RateLimiter;
use serde_json::{Value, json};

fn listing(name: &str, receive: u64, pay: u64, stock: u64) -> Value {
    json!({
        "id": format!("id-{name}"),
        "listing": {
            "account": { "name": "acct", "lastCharacterName": name },
            "price": {
                "item": { "currency": "chaos", "amount": receive, "stock": stock },
                "exchange": { "currency": "exalted", "amount": pay }
            }
        }
    })
}

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("id{i}")).collect()
}

fn no_exchange() -> impl Fn(String, Value) -> Result<Value, FlipError> + Send + Sync + 'static {
    |_, _| panic!("exchange search must not be called")
}

#[tokio::test]
async fn empty_ids_short_circuit_without_a_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = Arc::clone(&calls);
    let api = <dyn TradeApi>::from_fns(no_exchange(), move |_, _| {
        calls_in.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "result": [] }))
    });
    let poe = PoeConnector::builder().api(api).build().unwrap();

    let offers = poe.fetch_offer_details(&[], "q1", 5).await.unwrap();
    assert!(offers.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(poe.limiter().state().await.in_window, 0);
}

#[tokio::test]
async fn only_the_first_ids_are_fetched_in_order() {
    let seen = Arc::new(Mutex::new(None));
    let seen_in = Arc::clone(&seen);
    let api = <dyn TradeApi>::from_fns(no_exchange(), move |ids: Vec<String>, query_id| {
        let result: Vec<Value> = ids.iter().map(|id| listing(id, 1, 1, 1)).collect();
        *seen_in.lock().unwrap() = Some((ids, query_id));
        Ok(json!({ "result": result }))
    });
    let poe = PoeConnector::builder().api(api).build().unwrap();

    let offers = poe.fetch_offer_details(&ids(10), "q1", 5).await.unwrap();

    let (sent, query_id) = seen.lock().unwrap().take().unwrap();
    assert_eq!(sent, vec!["id0", "id1", "id2", "id3", "id4"]);
    assert_eq!(query_id, "q1");
    let names: Vec<&str> = offers.iter().map(|o| o.contact_ign.as_str()).collect();
    assert_eq!(names, vec!["id0", "id1", "id2", "id3", "id4"]);
}

#[tokio::test]
async fn fewer_ids_than_limit_are_all_fetched() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in = Arc::clone(&seen);
    let api = <dyn TradeApi>::from_fns(no_exchange(), move |ids: Vec<String>, _| {
        *seen_in.lock().unwrap() = ids;
        Ok(json!({ "result": [] }))
    });
    let poe = PoeConnector::builder().api(api).build().unwrap();

    poe.fetch_offer_details(&ids(2), "q1", 5).await.unwrap();
    assert_eq!(*seen.lock().unwrap(), vec!["id0", "id1"]);
}

#[tokio::test]
async fn normalizes_each_listing() {
    let api = <dyn TradeApi>::from_fns(no_exchange(), |_, _| {
        Ok(json!({
            "result": [listing("SellerA", 1, 2, 40), listing("SellerB", 3, 1, 7)]
        }))
    });
    let poe = PoeConnector::builder().api(api).build().unwrap();

    let offers = poe
        .fetch_offer_details(&["a".to_string(), "b".to_string()], "q1", 5)
        .await
        .unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].contact_ign, "SellerA");
    assert_eq!(offers[0].conversion_rate, Decimal::from_str("0.5").unwrap());
    assert_eq!(offers[0].stock, 40);
    assert_eq!(offers[1].contact_ign, "SellerB");
    assert_eq!(offers[1].conversion_rate, Decimal::from(3));
    assert_eq!(offers[1].stock, 7);
}

#[tokio::test]
async fn missing_result_is_a_fetch_error_not_throttling() {
    let api = <dyn TradeApi>::from_fns(no_exchange(), |_, _| {
        Ok(json!({ "error": { "code": 3, "message": "Rate limit exceeded" } }))
    });
    let poe = PoeConnector::builder().api(api).build().unwrap();

    let err = poe
        .fetch_offer_details(&["a".to_string()], "q1", 5)
        .await
        .unwrap_err();
    assert!(matches!(err, FlipError::Fetch(_)), "got {err:?}");
}

#[tokio::test(start_paused = true)]
async fn both_stages_draw_from_one_window() {
    let limiter = Arc::new(RateLimiter::new(RateLimitConfig {
        max_calls: 1,
        period: Duration::from_secs(5),
    }));
    let api = <dyn TradeApi>::from_fns(
        |_, _| Ok(json!({ "result": ["a"], "id": "q1" })),
        |_, _| Ok(json!({ "result": [listing("Seller", 1, 1, 1)] })),
    );
    let poe = PoeConnector::builder()
        .api(api)
        .limiter(Arc::clone(&limiter))
        .build()
        .unwrap();

    let start = tokio::time::Instant::now();
    let found = poe
        .fetch_offer_ids("Standard", "chaos", "exalted")
        .await
        .unwrap();
    assert!(start.elapsed() < Duration::from_millis(10));

    let offers = poe
        .fetch_offer_details(&found.offer_ids, &found.query_id, 5)
        .await
        .unwrap();
    assert_eq!(offers.len(), 1);
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert_eq!(limiter.state().await.in_window, 1);
}

#[tokio::test(start_paused = true)]
async fn default_limiter_admits_four_calls_per_window() {
    let api = <dyn TradeApi>::from_fns(no_exchange(), |_, _| Ok(json!({ "result": [] })));
    let poe = PoeConnector::builder().api(api).build().unwrap();
    let one = vec!["a".to_string()];

    let start = tokio::time::Instant::now();
    for _ in 0..4 {
        poe.fetch_offer_details(&one, "q", 5).await.unwrap();
    }
    assert!(start.elapsed() < Duration::from_millis(10));

    poe.fetch_offer_details(&one, "q", 5).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(5));
}
