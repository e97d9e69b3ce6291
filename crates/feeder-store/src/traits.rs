//! Store trait definitions.

use crate::StoreError;
use feeder_core::Document;

/// A connected document store client.
///
/// Connecting is backend-specific (each backend has its own constructor);
/// this trait covers what happens after a client exists.
///
/// # Usage Pattern
///
/// ```ignore
/// let database = store.ensure_database("feeder").await?;
/// let container = store.container(&database, "items").await?;
/// container.upsert(&document, &document.partition_key).await?;
/// ```
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Handle to a database.
    type Database: Send + Sync;
    /// Handle to a container; shared read-only by concurrent writers.
    type Container: DocumentContainer + 'static;

    /// Create the database if it does not exist. Idempotent.
    async fn ensure_database(&self, name: &str) -> Result<Self::Database, StoreError>;

    /// Get a handle to a container inside `database`.
    async fn container(
        &self,
        database: &Self::Database,
        name: &str,
    ) -> Result<Self::Container, StoreError>;
}

/// A container documents are upserted into.
#[async_trait::async_trait]
pub trait DocumentContainer: Send + Sync {
    /// Container name, for logging.
    fn name(&self) -> &str;

    /// Insert `document`, or overwrite the stored document with the same
    /// id under `partition_key`. Returns the document as stored.
    async fn upsert(
        &self,
        document: &Document,
        partition_key: &str,
    ) -> Result<Document, StoreError>;
}
