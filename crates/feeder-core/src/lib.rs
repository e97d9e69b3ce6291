//! Core types for the doc-feeder load generator.
//!
//! This crate provides the foundational types shared by the generator,
//! the store backends and the populator:
//!
//! - [`Document`] / [`InnerDocument`] - the unit of write
//! - [`WriteOutcome`] / [`WriteFailure`] - per-document result of an upsert
//! - [`DocumentWrite`] - an outcome tagged with the partition key it was routed to
//! - [`CycleResult`] - aggregate of one generate-then-write cycle
//!
//! # Architecture
//!
//! ```text
//! feeder-core (this crate)
//!    │
//!    ├─── feeder-generator      (builds Documents from a seeded RNG)
//!    ├─── feeder-store          (DocumentStore traits, in-memory store)
//!    │       └─── feeder-store-mongodb
//!    └─── feeder-populate       (BulkWriter, CycleRunner)
//! ```

pub mod document;
pub mod outcome;

// Re-exports for convenience
pub use document::{Document, InnerDocument, DICTIONARY_KEYS};
pub use outcome::{CycleResult, DocumentWrite, WriteFailure, WriteOutcome};
