//! Document store trait abstraction.
//!
//! This crate defines the [`DocumentStore`] and [`DocumentContainer`]
//! traits the populator writes through, the [`StoreError`] taxonomy, and
//! [`MemoryStore`], an in-process implementation used for dry runs and
//! tests.
//!
//! Backends implement both traits; the CLI entry point picks a backend
//! once and everything downstream is monomorphized for it.

mod error;
pub mod memory;
mod traits;

pub use error::StoreError;
pub use memory::{FaultInjector, MemoryContainer, MemoryDatabase, MemoryStore};
pub use traits::{DocumentContainer, DocumentStore};
