//! Document generator for the doc-feeder load generator.
//!
//! This crate provides the [`DocumentFactory`] which produces deterministic
//! batches of documents. The factory uses a seeded RNG so the same
//! `(count, seed)` pair always yields the same batch.
//!
//! # Architecture
//!
//! ```text
//!   (count, seed)
//!        │
//!        ▼
//! ┌───────────────────┐
//! │  DocumentFactory  │
//! │                   │
//! │  - reference time │
//! │  - id pool        │
//! │  - inner range    │
//! └─────────┬─────────┘
//!           │  StdRng::seed_from_u64(seed)
//!           ▼
//!    Document { id, partitionKey = index, ... }
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use feeder_generator::DocumentFactory;
//!
//! let reference = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let factory = DocumentFactory::new(reference);
//! let batch = factory.generate_batch(5, 8675309);
//! assert_eq!(batch[4].partition_key, "4");
//! ```
//!
//! # Field rules
//!
//! - `id` - `SomeId-{n}` with `n` in `[1, id_pool]`
//! - `partitionKey` - batch index as a string
//! - `guidProperty` - UUID v4 from the seeded RNG
//! - `boolProperty` - fair coin
//! - `stringProperty` - 10 lowercase letters
//! - `intProperty` - integer in `[0, 1_000_000]`
//! - `dateOnlyProperty` - date within the year before the reference time
//! - `decimalProperty` - decimal in `[0, 1_000_000]`
//! - `dictionaryProperty` - `ABC`, `DEF`, `GHI` mapped to decimals
//! - `innerItems` - 1 to 15 nested documents dated within the year after the reference time

pub mod factory;
pub mod generators;

// Re-exports for convenience
pub use factory::{DocumentFactory, DocumentIterator, GeneratorError};
