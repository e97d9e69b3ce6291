//! Individual value generators for the document fields.
//!
//! Every generator draws from the caller's RNG so that a whole batch is
//! reproducible from a single seed.

pub mod array;
pub mod numeric;
pub mod text;
pub mod timestamp;
pub mod uuid;

/// Seconds in a (non-leap) year, the window used for past and future dates.
pub const YEAR_SECONDS: i64 = 365 * 24 * 60 * 60;
