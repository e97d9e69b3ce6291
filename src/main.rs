//! Command-line interface for doc-feeder
//!
//! # Usage Examples
//!
//! ```bash
//! # Soak a MongoDB collection: 150000 cycles of 1000 upserts each
//! doc-feeder \
//!   --endpoint-url mongodb://localhost:27017 \
//!   --database-name feeder \
//!   --container-name documents
//!
//! # Cosmos DB for MongoDB with an account key, bounded fan-out
//! FEEDER_AUTHORIZATION_KEY=... doc-feeder \
//!   --endpoint-url "mongodb://account.mongo.cosmos.azure.com:10255/?ssl=true" \
//!   --username account \
//!   --database-name feeder --container-name documents \
//!   --max-concurrency 200
//!
//! # Exercise the loop without a database
//! doc-feeder --dry-run --cycles 3 --batch-size 100 --settle-delay 0
//! ```
//!
//! Exits non-zero if settings are invalid or the database/container setup
//! fails. Individual write failures are logged and do not stop the run.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use doc_feeder::config::{Settings, SettingsFile};
use doc_feeder::logging::{init_tracing, mask_connection_password};
use doc_feeder::{RunOpts, StoreKind, StoreOpts};
use feeder_generator::DocumentFactory;
use feeder_populate::{BulkWriter, CycleRunner, RunMetrics};
use feeder_store::{DocumentStore, MemoryStore};
use feeder_store_mongodb::MongoDocumentStore;
use std::path::PathBuf;

const APP_NAME: &str = "doc-feeder";

#[derive(Parser)]
#[command(name = "doc-feeder")]
#[command(about = "Upsert batches of generated documents into a document database, cycle after cycle")]
#[command(long_about = None)]
struct Cli {
    /// Settings file (TOML) with [store] and [run] sections
    #[arg(long, short = 'c', env = "FEEDER_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    store: StoreOpts,

    #[command(flatten)]
    run: RunOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        tracing::error!("Program terminated unexpectedly ({}): {:#}", APP_NAME, e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    tracing::info!("Starting up ({})", APP_NAME);

    let file = match &cli.config {
        Some(path) => SettingsFile::from_file(path)?,
        None => SettingsFile::default(),
    };
    let settings = Settings::resolve(file, &cli.store, &cli.run)?;

    // Anchor generated dates once so every cycle's batch is identical
    let factory = DocumentFactory::new(Utc::now());
    let writer = BulkWriter::new()
        .with_max_concurrency(settings.max_concurrency)
        .with_settle_delay(settings.settle_delay);

    let metrics = match settings.store.kind {
        StoreKind::Memory => {
            tracing::info!("[DRY-RUN] Writing to the in-memory store");
            execute(MemoryStore::new(), &settings, factory, writer).await?
        }
        StoreKind::Mongodb => {
            let endpoint = settings
                .store
                .endpoint_url
                .as_deref()
                .context("Endpoint URL is required")?;
            tracing::info!("Connecting to {}", mask_connection_password(endpoint));

            let store = MongoDocumentStore::connect(endpoint, settings.store.credential())
                .await
                .context("Failed to connect to the document store")?;
            execute(store, &settings, factory, writer).await?
        }
    };

    // Single-line JSON summary for CI tooling
    println!("{}", serde_json::to_string(&metrics)?);

    tracing::info!("Finishing ({})", APP_NAME);
    Ok(())
}

async fn execute<S: DocumentStore>(
    store: S,
    settings: &Settings,
    factory: DocumentFactory,
    writer: BulkWriter,
) -> anyhow::Result<RunMetrics> {
    let runner = CycleRunner::new(
        store,
        &settings.store.database_name,
        &settings.store.container_name,
        factory,
        settings.run.clone(),
    )
    .with_writer(writer);

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler available; run all cycles
            std::future::pending::<()>().await;
        }
    };

    runner
        .run_until(shutdown)
        .await
        .context("Run aborted")
}
