//! Bulk write orchestration for the doc-feeder load generator.
//!
//! - [`BulkWriter`] fans one batch out as concurrent upserts and joins them
//! - [`CycleRunner`] drives sequential generate-then-write cycles
//! - [`RunMetrics`] accumulates run-level totals

pub mod error;
pub mod metrics;
pub mod runner;
pub mod writer;

pub use error::PopulateError;
pub use metrics::RunMetrics;
pub use runner::{CycleRunner, RunOptions, SeedMode};
pub use writer::{BulkWriter, DEFAULT_SETTLE_DELAY};
