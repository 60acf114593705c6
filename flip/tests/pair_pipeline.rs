use std::sync::Arc;

use flip::{CurrencyPair, Flip, FlipError, NormalizedOffer, QueryResult, ViableOffers};
use flip_mock::{DynamicMockSource, MockBehavior, MockSource};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn offer(ign: &str, rate: i64, stock: u64) -> NormalizedOffer {
    NormalizedOffer {
        contact_ign: ign.to_string(),
        conversion_rate: Decimal::from(rate),
        stock,
    }
}

fn found(n: usize, query_id: &str) -> QueryResult {
    QueryResult {
        offer_ids: (0..n).map(|i| format!("id{i}")).collect(),
        query_id: query_id.to_string(),
    }
}

#[tokio::test]
async fn search_then_details_then_filter_then_truncate() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let pair = CurrencyPair::new("chaos", "exalted");
    controller
        .set_search_behavior(pair.clone(), MockBehavior::Return(found(8, "q1")))
        .await;
    controller
        .set_detail_behavior(
            "q1",
            MockBehavior::Return(vec![
                offer("Me", 160, 100),
                offer("A", 158, 100),
                offer("B", 157, 2),
                offer("C", 156, 100),
                offer("D", 155, 100),
            ]),
        )
        .await;

    let flip = Flip::builder()
        .with_source(source)
        .filter(Arc::new(
            ViableOffers::new().excluding_characters(["Me"]).min_stock(10),
        ))
        .build()
        .unwrap();

    let res = flip.fetch_for_pair("Standard", &pair, 2).await.unwrap();

    let names: Vec<&str> = res.offers.iter().map(|o| o.contact_ign.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert_eq!(res.want, "chaos");
    assert_eq!(res.have, "exalted");
    assert_eq!(res.league, "Standard");

    let details = controller.detail_requests().await;
    assert_eq!(details.len(), 1);
    let (ids, query_id, limit) = &details[0];
    assert_eq!(ids.len(), 8);
    assert_eq!(query_id, "q1");
    assert_eq!(*limit, 5);
}

#[tokio::test]
async fn detail_limit_is_configurable() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let pair = CurrencyPair::new("divine", "chaos");
    controller
        .set_search_behavior(pair.clone(), MockBehavior::Return(found(3, "q2")))
        .await;

    let flip = Flip::builder()
        .with_source(source)
        .detail_limit(10)
        .build()
        .unwrap();
    flip.fetch_for_pair("Standard", &pair, 3).await.unwrap();

    let details = controller.detail_requests().await;
    assert_eq!(details[0].2, 10);
}

#[tokio::test]
async fn filter_receives_the_pair_symbols() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let pair = CurrencyPair::new("alchemy", "chaos");
    controller
        .set_search_behavior(pair.clone(), MockBehavior::Return(found(1, "q3")))
        .await;
    controller
        .set_detail_behavior("q3", MockBehavior::Return(vec![offer("A", 9, 5)]))
        .await;

    let only_alchemy = |want: &str, _: &str, offers: Vec<NormalizedOffer>| -> Vec<NormalizedOffer> {
        if want == "alchemy" { offers } else { vec![] }
    };
    let flip = Flip::builder()
        .with_source(source)
        .filter(Arc::new(only_alchemy))
        .build()
        .unwrap();

    let res = flip.fetch_for_pair("Standard", &pair, 3).await.unwrap();
    assert_eq!(res.offers.len(), 1);
}

#[tokio::test]
async fn empty_search_skips_the_listing_fetch() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let flip = Flip::builder().with_source(source).build().unwrap();

    let res = flip
        .fetch_for_pair("Standard", &CurrencyPair::new("regal", "chaos"), 3)
        .await
        .unwrap();
    assert!(res.offers.is_empty());
    assert_eq!(controller.searches().await.len(), 1);
    assert!(controller.detail_requests().await.is_empty());
}

#[tokio::test]
async fn stage_errors_propagate_unchanged() {
    let (source, controller) = DynamicMockSource::new_with_controller("dyn");
    let pair = CurrencyPair::new("chaos", "exalted");
    controller
        .set_search_behavior(pair.clone(), MockBehavior::Return(found(2, "q4")))
        .await;
    controller
        .set_detail_behavior(
            "q4",
            MockBehavior::Fail(FlipError::Fetch("listing fetch response lacked result".into())),
        )
        .await;
    let flip = Flip::builder().with_source(source).build().unwrap();

    let err = flip
        .fetch_for_pair("Standard", &pair, 3)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FlipError::Fetch("listing fetch response lacked result".into())
    );
}

proptest! {
    #[test]
    fn keeps_a_ranked_prefix(limit in 1usize..10, detail_limit in 1usize..10) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let flip = Flip::builder()
            .with_source(Arc::new(MockSource::new()))
            .detail_limit(detail_limit)
            .build()
            .unwrap();

        let res = rt
            .block_on(flip.fetch_for_pair("Standard", &CurrencyPair::new("chaos", "exalted"), limit))
            .unwrap();

        // The chaos<-exalted fixture has six listings, all viable.
        let expected = ["Exalter", "ChaosFarmer", "BulkBoss", "Whisperer", "LateSeller", "LowBall"];
        let n = limit.min(detail_limit).min(expected.len());
        let names: Vec<&str> = res.offers.iter().map(|o| o.contact_ign.as_str()).collect();
        prop_assert_eq!(names, expected[..n].to_vec());
    }
}
