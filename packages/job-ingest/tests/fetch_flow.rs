//! Integration tests for the fetch half: fetcher, cache, limiter, dataflow.

use job_ingest::{
    CollectSink, Dataflow, FetchFailure, InspectSink, IntervalGate, ListingFetcher, ListingSource,
    MemoryCache, MockListingApi, QueryKey, RunSummary, Unlimited,
};
use jsearch_client::SearchResponse;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn listing(value: serde_json::Value) -> job_ingest::RawListing {
    job_ingest::testing::listing(value)
}

#[tokio::test]
async fn test_same_key_twice_makes_one_network_call() {
    let api = MockListingApi::new().with_listings(
        "AI Engineer",
        vec![
            listing(json!({"job_id": "1", "job_description": "Ship agents"})),
            listing(json!({"job_id": "2", "job_description": "Train models"})),
        ],
    );
    let fetcher = ListingFetcher::new(api.clone(), MemoryCache::new(), Unlimited);
    let key = QueryKey::new("AI Engineer");

    let first = fetcher.fetch(&key).await.into_items();
    let second = fetcher.fetch(&key).await.into_items();

    assert_eq!(api.call_count(), 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_non_ok_then_retry_hits_network_again() {
    let api = MockListingApi::new().with_response("AI Engineer", SearchResponse::error("ERROR", "rate limited"));
    let fetcher = ListingFetcher::new(api.clone(), MemoryCache::new(), Unlimited);
    let key = QueryKey::new("AI Engineer");

    let outcome = fetcher.fetch(&key).await;
    assert!(matches!(outcome.failure(), Some(FetchFailure::ApiStatus { .. })));

    fetcher.fetch(&key).await;
    assert_eq!(api.call_count_for("AI Engineer"), 2);
}

#[tokio::test]
async fn test_flow_prints_every_listing() {
    let api = MockListingApi::new()
        .with_listings("AI Engineer", vec![listing(json!({"job_id": "1"}))])
        .with_listings("Data Engineer", vec![listing(json!({"job_id": "2"}))]);
    let fetcher = Arc::new(ListingFetcher::new(api, MemoryCache::new(), Unlimited));
    let source = ListingSource::new(vec!["AI Engineer".into(), "Data Engineer".into()], fetcher);

    let mut sink = InspectSink::new(Vec::new());
    let summary = Dataflow::new("linkedin_jobs").run(&source, &mut sink).await.unwrap();
    assert_eq!(summary.items, 2);

    let printed = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        printed,
        "linkedin_jobs.inspect: {\"job_id\":\"1\"}\nlinkedin_jobs.inspect: {\"job_id\":\"2\"}\n"
    );
}

#[tokio::test]
async fn test_rerun_is_served_from_shared_cache() {
    let api = MockListingApi::new().with_listings("AI Engineer", vec![listing(json!({"job_id": "1"}))]);
    let fetcher = Arc::new(ListingFetcher::new(api.clone(), MemoryCache::new(), Unlimited));
    let source = ListingSource::new(vec!["AI Engineer".into()], Arc::clone(&fetcher));
    let flow = Dataflow::new("linkedin_jobs");

    let mut first = CollectSink::new();
    flow.run(&source, &mut first).await.unwrap();
    let mut second = CollectSink::new();
    flow.run(&source, &mut second).await.unwrap();

    assert_eq!(first.items(), second.items());
    assert_eq!(api.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_gate_spaces_requests_across_partitions() {
    let api = MockListingApi::new()
        .with_listings("a", vec![listing(json!({"job_id": "a"}))])
        .with_listings("b", vec![listing(json!({"job_id": "b"}))])
        .with_listings("c", vec![listing(json!({"job_id": "c"}))]);
    let gate = IntervalGate::new(Duration::from_secs(35));
    let fetcher = Arc::new(ListingFetcher::new(api, MemoryCache::new(), gate));
    let source = ListingSource::new(vec!["a".into(), "b".into(), "c".into()], fetcher);

    let start = tokio::time::Instant::now();
    let mut sink = CollectSink::new();
    let summary = Dataflow::new("linkedin_jobs").run(&source, &mut sink).await.unwrap();

    assert_eq!(summary, RunSummary { partitions: 3, batches: 3, items: 3 });
    assert!(start.elapsed() >= Duration::from_secs(70));
    assert!(start.elapsed() < Duration::from_secs(105));
}
