//! Concurrent bulk upsert of one batch.

use feeder_core::{CycleResult, Document, DocumentWrite, WriteFailure, WriteOutcome};
use feeder_store::DocumentContainer;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Pause after each batch so the store can flush its metrics and logs.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Writes a batch as one upsert task per document and joins them all.
///
/// A failed upsert is recorded and never cancels its siblings. The cycle
/// duration is taken once every task has resolved, then the writer sleeps
/// for the settling delay before returning.
#[derive(Debug, Clone)]
pub struct BulkWriter {
    max_concurrency: Option<usize>,
    settle_delay: Duration,
}

impl Default for BulkWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkWriter {
    /// Unbounded fan-out with the default settling delay.
    pub fn new() -> Self {
        Self {
            max_concurrency: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Bound the number of in-flight upserts. `None` or `Some(0)` is unbounded.
    pub fn with_max_concurrency(mut self, max_concurrency: Option<usize>) -> Self {
        self.max_concurrency = max_concurrency.filter(|n| *n > 0);
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Upsert every document of `batch` into `container`.
    pub async fn write_all<C>(
        &self,
        cycle: u64,
        batch: Vec<Document>,
        container: Arc<C>,
    ) -> CycleResult
    where
        C: DocumentContainer + 'static,
    {
        let limiter = self
            .max_concurrency
            .map(|permits| Arc::new(Semaphore::new(permits)));

        let start = Instant::now();
        let mut partition_keys = Vec::with_capacity(batch.len());
        let mut tasks = Vec::with_capacity(batch.len());

        for document in batch {
            partition_keys.push(document.partition_key.clone());
            let container = Arc::clone(&container);
            let limiter = limiter.clone();

            tasks.push(tokio::spawn(async move {
                // Held until the upsert resolves
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let result = container
                    .upsert(&document, &document.partition_key)
                    .await;
                report_outcome(cycle, &document.partition_key, result)
            }));
        }

        let joined = join_all(tasks).await;
        let duration = start.elapsed();

        let writes: Vec<DocumentWrite> = partition_keys
            .into_iter()
            .zip(joined)
            .map(|(partition_key, joined)| {
                let outcome = joined.unwrap_or_else(|e| {
                    warn!("Cycle: {} - {} write task failed: {}", cycle, partition_key, e);
                    WriteOutcome::Failure(WriteFailure::Unclassified(format!(
                        "write task failed: {e}"
                    )))
                });
                DocumentWrite {
                    partition_key,
                    outcome,
                }
            })
            .collect();

        if !self.settle_delay.is_zero() {
            debug!("Settling for {:?}", self.settle_delay);
            tokio::time::sleep(self.settle_delay).await;
        }

        let result = CycleResult::new(cycle, duration, writes);
        info!(
            "Finished writing {} items in {:?} ({} failed, {:.2} docs/sec)",
            result.item_count,
            result.duration,
            result.failure_count,
            result.documents_per_second()
        );
        result
    }
}

fn report_outcome(
    cycle: u64,
    partition_key: &str,
    result: Result<Document, feeder_store::StoreError>,
) -> WriteOutcome {
    match result {
        Ok(returned) => {
            info!("Cycle: {} - {}", cycle, returned.partition_key);
            WriteOutcome::Success {
                returned_partition_key: returned.partition_key,
            }
        }
        Err(error) => {
            let failure = WriteFailure::from(error);
            warn!("Cycle: {} - {} {}.", cycle, partition_key, failure);
            WriteOutcome::Failure(failure)
        }
    }
}
