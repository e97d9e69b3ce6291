//! Sequential cycle driver.

use crate::error::PopulateError;
use crate::metrics::RunMetrics;
use crate::writer::BulkWriter;
use chrono::Utc;
use feeder_core::CycleResult;
use feeder_generator::DocumentFactory;
use feeder_store::DocumentStore;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Default number of documents per cycle.
pub const DEFAULT_BATCH_SIZE: usize = 1_000;
/// Default number of cycles per run.
pub const DEFAULT_CYCLES: u64 = 150_000;
/// Default generator seed.
pub const DEFAULT_SEED: u64 = 8675309;

/// How the generator seed evolves across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Every cycle reuses the configured seed and so rewrites the same documents.
    #[default]
    Fixed,
    /// Cycle `i` uses `seed + i`.
    PerCycle,
}

/// Shape of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub cycles: u64,
    pub batch_size: usize,
    pub seed: u64,
    pub seed_mode: SeedMode,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: DEFAULT_SEED,
            seed_mode: SeedMode::Fixed,
        }
    }
}

impl RunOptions {
    /// Seed used to generate the batch of `cycle`.
    pub fn seed_for_cycle(&self, cycle: u64) -> u64 {
        match self.seed_mode {
            SeedMode::Fixed => self.seed,
            SeedMode::PerCycle => self.seed.wrapping_add(cycle),
        }
    }
}

/// Drives `cycles` sequential generate-then-write cycles against one store.
///
/// The store is connected once; the container handle is shared by every
/// write of every cycle. Setup failures abort the run, write failures
/// never do.
pub struct CycleRunner<S: DocumentStore> {
    store: S,
    database_name: String,
    container_name: String,
    factory: DocumentFactory,
    writer: BulkWriter,
    options: RunOptions,
}

impl<S: DocumentStore> CycleRunner<S> {
    pub fn new(
        store: S,
        database_name: impl Into<String>,
        container_name: impl Into<String>,
        factory: DocumentFactory,
        options: RunOptions,
    ) -> Self {
        Self {
            store,
            database_name: database_name.into(),
            container_name: container_name.into(),
            factory,
            writer: BulkWriter::new(),
            options,
        }
    }

    /// Replace the default writer (unbounded, 1s settling delay).
    pub fn with_writer(mut self, writer: BulkWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Ensure the database exists and open the container.
    pub async fn connect(&self) -> Result<Arc<S::Container>, PopulateError> {
        info!(
            "Connecting to database '{}', container '{}'",
            self.database_name, self.container_name
        );
        let database = self.store.ensure_database(&self.database_name).await?;
        let container = self
            .store
            .container(&database, &self.container_name)
            .await?;
        Ok(Arc::new(container))
    }

    /// Generate one batch and write it.
    pub async fn run_cycle(&self, cycle: u64, container: &Arc<S::Container>) -> CycleResult {
        info!("Cycle {}", cycle);

        info!("Creating items...");
        let batch = self
            .factory
            .generate_batch(self.options.batch_size, self.options.seed_for_cycle(cycle));

        info!("Starting...");
        self.writer
            .write_all(cycle, batch, Arc::clone(container))
            .await
    }

    /// Run every configured cycle.
    pub async fn run(&self) -> Result<RunMetrics, PopulateError> {
        self.run_until(std::future::pending()).await
    }

    /// Run until all cycles are done or `shutdown` resolves.
    ///
    /// `shutdown` is only checked between cycles; a started cycle always
    /// drains completely.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<RunMetrics, PopulateError>
    where
        F: Future<Output = ()>,
    {
        if self.options.batch_size == 0 {
            return Err(PopulateError::Config(
                "batch size must be greater than zero".to_string(),
            ));
        }

        let container = self.connect().await?;
        let mut shutdown = std::pin::pin!(shutdown);
        let mut metrics = RunMetrics::new(Utc::now());

        info!(
            "Running {} cycles of {} documents (seed={}, {:?})",
            self.options.cycles, self.options.batch_size, self.options.seed, self.options.seed_mode
        );

        for cycle in 0..self.options.cycles {
            if shutdown.as_mut().now_or_never().is_some() {
                warn!("Stop requested, ending run before cycle {}", cycle);
                metrics.cancelled = true;
                break;
            }

            let result = self.run_cycle(cycle, &container).await;
            report_cycle(&result);
            metrics.record(&result);
        }

        info!(
            "Run complete: {} cycles, {} documents, {} failed in {:?} ({:.2} docs/sec)",
            metrics.cycles_completed,
            metrics.documents_attempted,
            metrics.failures,
            metrics.write_duration(),
            metrics.documents_per_second()
        );

        Ok(metrics)
    }
}

fn report_cycle(result: &CycleResult) {
    if result.failure_count > 0 {
        warn!(
            "Cycle {} finished: {} of {} items failed in {:?}",
            result.cycle, result.failure_count, result.item_count, result.duration
        );
    } else {
        info!(
            "Cycle {} finished: {} items in {:?}",
            result.cycle, result.item_count, result.duration
        );
    }
}
