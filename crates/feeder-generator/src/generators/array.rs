//! Nested sub-document array generator.

use super::timestamp::generate_future_timestamp;
use super::uuid::generate_uuid_v4;
use chrono::{DateTime, Utc};
use feeder_core::InnerDocument;
use rand::Rng;

/// Probability that an inner item's `test_flag` is set.
pub const TEST_FLAG_WEIGHT: f64 = 0.3;

/// Generate between `min_length` and `max_length` (inclusive) inner documents.
pub fn generate_inner_items<R: Rng>(
    rng: &mut R,
    reference: DateTime<Utc>,
    min_length: usize,
    max_length: usize,
) -> Vec<InnerDocument> {
    let length = rng.gen_range(min_length..=max_length);

    (0..length)
        .map(|_| InnerDocument {
            id: generate_uuid_v4(rng),
            date_created: generate_future_timestamp(rng, reference),
            test_flag: rng.gen_bool(TEST_FLAG_WEIGHT),
        })
        .collect()
}
