//! MongoDB client lifecycle and container writes.

use crate::convert::{document_filter, to_bson_document};
use crate::error::classify;
use bson::{doc, Document as BsonDocument};
use feeder_core::Document;
use feeder_store::{DocumentContainer, DocumentStore, StoreError};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

/// Server code for "collection already exists".
const NAMESPACE_EXISTS: i32 = 48;

/// Credential used when the endpoint does not embed one.
#[derive(Debug, Clone)]
pub struct MongoCredential {
    pub username: String,
    pub authorization_key: String,
}

/// [`DocumentStore`] backed by a MongoDB-protocol server.
#[derive(Clone)]
pub struct MongoDocumentStore {
    client: Client,
}

impl MongoDocumentStore {
    /// Connect to `endpoint` (a `mongodb://` or `mongodb+srv://` URI).
    ///
    /// The driver connects lazily; unreachable servers surface on the
    /// first command, which is [`DocumentStore::ensure_database`].
    pub async fn connect(
        endpoint: &str,
        credential: Option<MongoCredential>,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(endpoint)
            .await
            .map_err(|e| StoreError::Setup(format!("Invalid endpoint: {e}")))?;

        if let Some(credential) = credential {
            let mut driver_credential = Credential::default();
            driver_credential.username = Some(credential.username);
            driver_credential.password = Some(credential.authorization_key);
            options.credential = Some(driver_credential);
        }

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Setup(format!("Failed to create client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl DocumentStore for MongoDocumentStore {
    type Database = Database;
    type Container = MongoContainer;

    async fn ensure_database(&self, name: &str) -> Result<Database, StoreError> {
        let database = self.client.database(name);

        // MongoDB creates databases on first write; a ping proves we can reach it
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Setup(format!("Failed to reach database '{name}': {e}")))?;

        info!("Connected to database '{}'", name);
        Ok(database)
    }

    async fn container(&self, database: &Database, name: &str) -> Result<MongoContainer, StoreError> {
        let existing = database
            .list_collection_names()
            .await
            .map_err(|e| StoreError::Setup(format!("Failed to list collections: {e}")))?;

        if !existing.iter().any(|c| c == name) {
            debug!("Creating collection '{}'", name);
            if let Err(e) = database.create_collection(name).await {
                // Another process may have created it in between
                if classify(e.clone()).status_code() != Some(NAMESPACE_EXISTS) {
                    return Err(StoreError::Setup(format!(
                        "Failed to create collection '{name}': {e}"
                    )));
                }
            }
        }

        Ok(MongoContainer {
            name: name.to_string(),
            collection: database.collection(name),
        })
    }
}

/// Collection handle; cheap to share across tasks.
pub struct MongoContainer {
    name: String,
    collection: Collection<BsonDocument>,
}

#[async_trait::async_trait]
impl DocumentContainer for MongoContainer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(
        &self,
        document: &Document,
        partition_key: &str,
    ) -> Result<Document, StoreError> {
        let replacement = to_bson_document(document, partition_key)?;

        self.collection
            .replace_one(document_filter(document, partition_key), replacement)
            .upsert(true)
            .await
            .map_err(classify)?;

        let mut stored = document.clone();
        stored.partition_key = partition_key.to_string();
        Ok(stored)
    }
}
