//! Matching engine behavior over fixed listing sources.

use std::sync::atomic::Ordering;
use std::time::Duration;

use futures_util::StreamExt;
use rust_decimal_macros::dec;

use floatarb::application::matching::{MatchingEngine, MatchingRules, RoundPhase};
use floatarb::testkit::domain::{listing, pool_listing};
use floatarb::testkit::source::{FailingSource, StaticSource};

fn engine() -> MatchingEngine {
    MatchingEngine::new(MatchingRules::default())
}

#[tokio::test]
async fn threshold_boundary_is_inclusive() {
    let pool = vec![
        pool_listing(dec!(90), dec!(10), 0.151),
        pool_listing(dec!(90), dec!(10), 0.251),
    ];
    let walked = vec![listing(dec!(86), 0.152), listing(dec!(85), 0.252)];

    let results = engine()
        .run(
            StaticSource::new("a", pool).boxed(),
            StaticSource::new("b", walked).boxed(),
        )
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(results.len(), 1, "86 against 100 is 14% and is rejected");
    assert_eq!(results[0].arbitrage_percent(), 15);
    assert_eq!(results[0].source_b().price(), dec!(85));
}

#[tokio::test]
async fn pool_listings_back_at_most_one_result() {
    let pool = vec![
        pool_listing(dec!(100), dec!(0), 0.15),
        pool_listing(dec!(100), dec!(0), 0.15),
    ];
    let walked: Vec<_> = (0..6).map(|_| listing(dec!(50), 0.15)).collect();

    let round = engine()
        .run(
            StaticSource::new("a", pool).boxed(),
            StaticSource::new("b", walked).boxed(),
        )
        .await
        .unwrap();
    let results = round.collect().await;

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn best_candidate_wins_and_leaves_the_pool() {
    let pool = vec![
        pool_listing(dec!(100), dec!(0), 0.301),
        pool_listing(dec!(120), dec!(2), 0.302),
    ];
    // 80/100 → 20%, 80/122 → 35%.
    let walked = vec![listing(dec!(80), 0.303), listing(dec!(80), 0.304)];

    let mut round = engine()
        .run(
            StaticSource::new("a", pool).boxed(),
            StaticSource::new("b", walked).boxed(),
        )
        .await
        .unwrap();

    let first = round.next_match().await.unwrap();
    assert_eq!(first.arbitrage_percent(), 35);
    assert_eq!(first.source_a().adjusted_price(), dec!(122));
    assert_eq!(round.remaining_pool(), 1);

    let second = round.next_match().await.unwrap();
    assert_eq!(second.arbitrage_percent(), 20);
    assert!(round.next_match().await.is_none());
    assert_eq!(round.phase(), RoundPhase::Done);
}

#[tokio::test]
async fn different_buckets_never_match() {
    let pool = vec![pool_listing(dec!(100), dec!(0), 0.154)];
    let walked = vec![listing(dec!(1), 0.156)];

    let results = engine()
        .run(
            StaticSource::new("a", pool).boxed(),
            StaticSource::new("b", walked).boxed(),
        )
        .await
        .unwrap()
        .collect()
        .await;

    assert!(results.is_empty());
}

#[tokio::test(start_paused = true)]
async fn empty_pool_skips_comparison_without_waiting_for_b() {
    let b = StaticSource::new("b", vec![listing(dec!(1), 0.1)]).with_delay(Duration::from_secs(3600));
    let b_finished = b.finished();

    let round = engine()
        .run(StaticSource::new("a", Vec::new()).boxed(), b.boxed())
        .await
        .unwrap();

    assert_eq!(round.phase(), RoundPhase::Done);
    assert_eq!(round.stats().fan_outs, 0);
    assert!(!b_finished.load(Ordering::SeqCst));
    assert!(round.collect().await.is_empty());
}

#[tokio::test]
async fn results_stream_in_b_arrival_order() {
    let pool = vec![
        pool_listing(dec!(100), dec!(0), 0.11),
        pool_listing(dec!(100), dec!(0), 0.22),
        pool_listing(dec!(100), dec!(0), 0.33),
    ];
    let walked = vec![
        listing(dec!(70), 0.33),
        listing(dec!(60), 0.11),
        listing(dec!(50), 0.22),
    ];

    let round = engine()
        .run(
            StaticSource::new("a", pool).boxed(),
            StaticSource::new("b", walked).boxed(),
        )
        .await
        .unwrap();
    let percents: Vec<i64> = round
        .into_stream()
        .map(|result| result.arbitrage_percent())
        .collect()
        .await;

    assert_eq!(percents, vec![30, 40, 50]);
}

#[tokio::test]
async fn source_failure_fails_the_round() {
    let result = engine()
        .run(
            StaticSource::new("a", vec![pool_listing(dec!(100), dec!(0), 0.1)]).boxed(),
            FailingSource::new("b").boxed(),
        )
        .await;

    let err = result.err().unwrap();
    assert_eq!(err.category(), "transport");
}

#[tokio::test]
async fn custom_threshold_applies() {
    let rules = MatchingRules {
        threshold_percent: 40,
        ..MatchingRules::default()
    };
    let pool = vec![pool_listing(dec!(100), dec!(0), 0.5)];
    let walked = vec![listing(dec!(70), 0.5)];

    let results = MatchingEngine::new(rules)
        .run(
            StaticSource::new("a", pool).boxed(),
            StaticSource::new("b", walked).boxed(),
        )
        .await
        .unwrap()
        .collect()
        .await;

    assert!(results.is_empty());
}
