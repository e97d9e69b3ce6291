//! End-to-end runs of the cycle runner against the in-memory store.

use chrono::{TimeZone, Utc};
use feeder_core::{WriteFailure, WriteOutcome};
use feeder_generator::DocumentFactory;
use feeder_populate::{BulkWriter, CycleRunner, RunOptions, SeedMode};
use feeder_store::{MemoryStore, StoreError};
use std::collections::BTreeSet;
use std::time::Duration;

const SEED: u64 = 8675309;
const DATABASE: &str = "loadtest";
const CONTAINER: &str = "documents";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("feeder_populate=debug")
        .with_test_writer()
        .try_init()
        .ok();
}

fn runner(store: MemoryStore, cycles: u64, batch_size: usize) -> CycleRunner<MemoryStore> {
    let factory = DocumentFactory::new(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    let options = RunOptions {
        cycles,
        batch_size,
        seed: SEED,
        seed_mode: SeedMode::Fixed,
    };
    CycleRunner::new(store, DATABASE, CONTAINER, factory, options)
        .with_writer(BulkWriter::new().with_settle_delay(Duration::ZERO))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_cycle_all_succeed() {
    init_tracing();
    let store = MemoryStore::new();
    let runner = runner(store.clone(), 1, 5);

    let container = runner.connect().await.unwrap();
    let result = runner.run_cycle(0, &container).await;

    assert_eq!(result.item_count, 5);
    assert_eq!(result.failure_count, 0);
    assert!(result.duration > Duration::ZERO);

    let keys: Vec<_> = result.writes.iter().map(|w| w.partition_key.as_str()).collect();
    assert_eq!(keys, vec!["0", "1", "2", "3", "4"]);
    for write in &result.writes {
        assert_eq!(
            write.outcome,
            WriteOutcome::Success {
                returned_partition_key: write.partition_key.clone()
            }
        );
    }

    let stored: BTreeSet<_> = store
        .documents(DATABASE, CONTAINER)
        .into_iter()
        .map(|d| d.partition_key)
        .collect();
    assert_eq!(stored.len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_single_cycle_odd_keys_fail() {
    init_tracing();
    let store = MemoryStore::new().with_fault(|_, key| {
        let index: u64 = key.parse().ok()?;
        (index % 2 == 1).then(|| StoreError::Status {
            code: 503,
            message: "Service unavailable".to_string(),
        })
    });
    let runner = runner(store.clone(), 1, 5);

    let container = runner.connect().await.unwrap();
    let result = runner.run_cycle(0, &container).await;

    assert_eq!(result.item_count, 5);
    assert_eq!(result.failure_count, 2);
    assert_eq!(store.upsert_attempts(), 5);

    let failed: Vec<_> = result.failures().map(|w| w.partition_key.as_str()).collect();
    assert_eq!(failed, vec!["1", "3"]);

    let succeeded: Vec<_> = result
        .writes
        .iter()
        .filter(|w| w.outcome.is_success())
        .map(|w| w.partition_key.as_str())
        .collect();
    assert_eq!(succeeded, vec!["0", "2", "4"]);

    for write in result.failures() {
        assert_eq!(
            write.outcome,
            WriteOutcome::Failure(WriteFailure::Status {
                code: 503,
                message: "Service unavailable".to_string()
            })
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_failures_do_not_stop_the_run() {
    init_tracing();
    let store = MemoryStore::new()
        .with_fault(|_, _| Some(StoreError::Transport("connection lost".to_string())));

    let metrics = runner(store.clone(), 3, 4).run().await.unwrap();

    assert_eq!(metrics.cycles_completed, 3);
    assert_eq!(metrics.documents_attempted, 12);
    assert_eq!(metrics.failures, 12);
    assert!(!metrics.cancelled);
    assert!(store.documents(DATABASE, CONTAINER).is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_repeated_ids_upsert_without_conflict() {
    init_tracing();
    let store = MemoryStore::new();

    // 40 documents over a pool of 10 ids: ids repeat within and across cycles
    let metrics = runner(store.clone(), 2, 40).run().await.unwrap();

    assert_eq!(metrics.failures, 0);
    let stored = store.documents(DATABASE, CONTAINER);
    assert_eq!(stored.len(), 40);
    let ids: BTreeSet<_> = stored.iter().map(|d| d.id.as_str()).collect();
    assert!(ids.len() <= 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_cycles_do_not_overlap() {
    init_tracing();
    let store = MemoryStore::new().with_latency(Duration::from_millis(30));
    let runner = runner(store.clone(), 3, 5);

    let started = std::time::Instant::now();
    let metrics = runner.run().await.unwrap();

    // Each cycle drains its 30ms writes before the next begins
    assert_eq!(metrics.cycles_completed, 3);
    assert!(started.elapsed() >= Duration::from_millis(90));
    assert!(metrics.write_duration() >= Duration::from_millis(90));
}
