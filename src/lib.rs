//! doc-feeder library
//!
//! A synthetic-load generator that repeatedly creates batches of randomized
//! documents and upserts them concurrently into a document database.
//!
//! # Crates
//!
//! - `feeder_core` - documents, write outcomes, cycle results
//! - `feeder_generator` - deterministic batch generation
//! - `feeder_store` - store traits and the in-memory store
//! - `feeder_store_mongodb` - MongoDB-protocol backend
//! - `feeder_populate` - bulk writer and cycle runner
//!
//! # CLI Usage
//!
//! ```bash
//! # 10 cycles of 1000 documents against MongoDB
//! doc-feeder --endpoint-url mongodb://localhost:27017 \
//!   --database-name feeder --container-name documents \
//!   --cycles 10 --batch-size 1000
//!
//! # Same loop against the in-memory store
//! doc-feeder --dry-run --cycles 3 --settle-delay 0
//!
//! # Settings from a file, overridden on the command line
//! doc-feeder --config feeder.toml --max-concurrency 64
//! ```

use clap::{Parser, ValueEnum};
use serde::Deserialize;

pub mod config;
pub mod logging;

/// Document store backend.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// MongoDB wire protocol (MongoDB, Cosmos DB for MongoDB, ...)
    #[default]
    Mongodb,
    /// In-process store, nothing leaves the process
    Memory,
}

#[derive(Parser, Clone, Debug, Default)]
pub struct StoreOpts {
    /// Document store backend
    #[arg(long, value_enum, env = "FEEDER_STORE")]
    pub store: Option<StoreKind>,

    /// Document store endpoint URL (e.g., mongodb://localhost:27017)
    #[arg(long, env = "FEEDER_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Authorization key (password) for the endpoint
    #[arg(long, env = "FEEDER_AUTHORIZATION_KEY", hide_env_values = true)]
    pub authorization_key: Option<String>,

    /// Username paired with the authorization key
    #[arg(long, env = "FEEDER_USERNAME")]
    pub username: Option<String>,

    /// Database to write into (created if absent)
    #[arg(long, env = "FEEDER_DATABASE_NAME")]
    pub database_name: Option<String>,

    /// Container (collection) to write into
    #[arg(long, env = "FEEDER_CONTAINER_NAME")]
    pub container_name: Option<String>,
}

#[derive(Parser, Clone, Debug, Default)]
pub struct RunOpts {
    /// Documents generated and written per cycle [default: 1000]
    #[arg(long, env = "FEEDER_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// Number of sequential cycles [default: 150000]
    #[arg(long, env = "FEEDER_CYCLES")]
    pub cycles: Option<u64>,

    /// Random seed for deterministic generation (same seed = same documents) [default: 8675309]
    #[arg(long, env = "FEEDER_SEED")]
    pub seed: Option<u64>,

    /// Maximum in-flight upserts per cycle (0 = one task per document)
    #[arg(long, env = "FEEDER_MAX_CONCURRENCY")]
    pub max_concurrency: Option<usize>,

    /// Pause after each cycle so the store can flush (e.g., "1s", "500ms") [default: 1s]
    #[arg(long, env = "FEEDER_SETTLE_DELAY")]
    pub settle_delay: Option<String>,

    /// Use seed + cycle index instead of reseeding identically every cycle
    #[arg(long, env = "FEEDER_VARY_SEED")]
    pub vary_seed: bool,

    /// Dry-run mode: write to the in-memory store instead of a database
    #[arg(long, env = "FEEDER_DRY_RUN")]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_flags_from_env() {
        // Only test in this crate that reads these variables
        std::env::set_var("FEEDER_VARY_SEED", "true");
        std::env::set_var("FEEDER_DRY_RUN", "true");

        let run = RunOpts::try_parse_from(["doc-feeder"]).unwrap();

        std::env::remove_var("FEEDER_VARY_SEED");
        std::env::remove_var("FEEDER_DRY_RUN");

        assert!(run.vary_seed);
        assert!(run.dry_run);
    }
}
