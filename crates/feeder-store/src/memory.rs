//! In-process document store.
//!
//! Keeps documents in a map keyed by `(id, partition_key)`, so repeated
//! upserts overwrite. Latency and per-document faults can be injected to
//! exercise the writer without a server.

use crate::{DocumentContainer, DocumentStore, StoreError};
use feeder_core::Document;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Decides whether an upsert of `(document, partition_key)` fails.
pub type FaultInjector = Arc<dyn Fn(&Document, &str) -> Option<StoreError> + Send + Sync>;

type Items = Arc<Mutex<HashMap<(String, String), Document>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory [`DocumentStore`].
///
/// Clones share the same databases and counters.
#[derive(Clone, Default)]
pub struct MemoryStore {
    databases: Arc<Mutex<HashMap<String, MemoryDatabase>>>,
    setup_failure: Option<StoreError>,
    fault: Option<FaultInjector>,
    latency: Duration,
    attempts: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail upserts for which `fault` returns an error.
    pub fn with_fault<F>(mut self, fault: F) -> Self
    where
        F: Fn(&Document, &str) -> Option<StoreError> + Send + Sync + 'static,
    {
        self.fault = Some(Arc::new(fault));
        self
    }

    /// Delay every upsert by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail database and container setup with `error`.
    pub fn failing_setup(mut self, error: StoreError) -> Self {
        self.setup_failure = Some(error);
        self
    }

    /// Number of upserts attempted so far, failed ones included.
    pub fn upsert_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Snapshot of the documents stored in `database`/`container`,
    /// ordered by `(id, partition_key)`.
    pub fn documents(&self, database: &str, container: &str) -> Vec<Document> {
        let items = {
            let databases = lock(&self.databases);
            let Some(db) = databases.get(database) else {
                return Vec::new();
            };
            let containers = lock(&db.containers);
            let items = match containers.get(container) {
                Some(items) => Arc::clone(items),
                None => return Vec::new(),
            };
            items
        };

        let items = lock(&items);
        let mut keys: Vec<_> = items.keys().collect();
        keys.sort();
        keys.into_iter().map(|key| items[key].clone()).collect()
    }
}

/// Database handle of a [`MemoryStore`].
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    name: String,
    containers: Arc<Mutex<HashMap<String, Items>>>,
}

impl MemoryDatabase {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Container handle of a [`MemoryStore`].
pub struct MemoryContainer {
    name: String,
    items: Items,
    fault: Option<FaultInjector>,
    latency: Duration,
    attempts: Arc<AtomicUsize>,
}

impl MemoryContainer {
    /// Number of stored documents.
    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a stored document by id and partition key.
    pub fn get(&self, id: &str, partition_key: &str) -> Option<Document> {
        lock(&self.items)
            .get(&(id.to_string(), partition_key.to_string()))
            .cloned()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    type Database = MemoryDatabase;
    type Container = MemoryContainer;

    async fn ensure_database(&self, name: &str) -> Result<MemoryDatabase, StoreError> {
        if let Some(error) = &self.setup_failure {
            return Err(error.clone());
        }

        let mut databases = lock(&self.databases);
        let database = databases
            .entry(name.to_string())
            .or_insert_with(|| MemoryDatabase {
                name: name.to_string(),
                containers: Arc::default(),
            });
        debug!("Using in-memory database '{}'", name);
        Ok(database.clone())
    }

    async fn container(
        &self,
        database: &MemoryDatabase,
        name: &str,
    ) -> Result<MemoryContainer, StoreError> {
        if let Some(error) = &self.setup_failure {
            return Err(error.clone());
        }

        let items = Arc::clone(
            lock(&database.containers)
                .entry(name.to_string())
                .or_default(),
        );
        Ok(MemoryContainer {
            name: name.to_string(),
            items,
            fault: self.fault.clone(),
            latency: self.latency,
            attempts: Arc::clone(&self.attempts),
        })
    }
}

#[async_trait::async_trait]
impl DocumentContainer for MemoryContainer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(
        &self,
        document: &Document,
        partition_key: &str,
    ) -> Result<Document, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(fault) = &self.fault {
            if let Some(error) = fault(document, partition_key) {
                return Err(error);
            }
        }

        let mut stored = document.clone();
        stored.partition_key = partition_key.to_string();
        lock(&self.items).insert(
            (stored.id.clone(), partition_key.to_string()),
            stored.clone(),
        );
        Ok(stored)
    }
}
