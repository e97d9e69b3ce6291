//! Batch factory producing deterministic documents.

use crate::generators::array::generate_inner_items;
use crate::generators::numeric::{generate_decimal_range, generate_int_range};
use crate::generators::text::{generate_lowercase_string, generate_pooled_id};
use crate::generators::timestamp::generate_past_date;
use crate::generators::uuid::generate_uuid_v4;
use chrono::{DateTime, Utc};
use feeder_core::{Document, DICTIONARY_KEYS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Prefix of generated document ids.
pub const ID_PREFIX: &str = "SomeId";
/// Default number of distinct document ids.
pub const DEFAULT_ID_POOL: u32 = 10;
/// Default bounds of the nested array length.
pub const DEFAULT_INNER_ITEMS: (usize, usize) = (1, 15);

const STRING_LENGTH: usize = 10;
const INT_MAX: i32 = 1_000_000;
const DECIMAL_MAX: i64 = 1_000_000;
const DECIMAL_SCALE: u32 = 4;

/// Error type for factory configuration.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A configured range is empty or starts at zero where at least one item is required
    #[error("Invalid range for {field}: {min}..={max}")]
    InvalidRange {
        field: &'static str,
        min: u64,
        max: u64,
    },
}

/// Factory that produces deterministic batches of documents.
///
/// Date fields are placed relative to `reference`, so a factory built once
/// and reused returns identical batches for identical `(count, seed)`.
#[derive(Debug, Clone)]
pub struct DocumentFactory {
    reference: DateTime<Utc>,
    id_pool: u32,
    inner_items_min: usize,
    inner_items_max: usize,
}

impl DocumentFactory {
    /// Create a factory with the default field rules.
    pub fn new(reference: DateTime<Utc>) -> Self {
        Self {
            reference,
            id_pool: DEFAULT_ID_POOL,
            inner_items_min: DEFAULT_INNER_ITEMS.0,
            inner_items_max: DEFAULT_INNER_ITEMS.1,
        }
    }

    /// Set how many distinct ids documents are drawn from.
    pub fn with_id_pool(mut self, pool: u32) -> Result<Self, GeneratorError> {
        if pool == 0 {
            return Err(GeneratorError::InvalidRange {
                field: "id",
                min: 1,
                max: 0,
            });
        }
        self.id_pool = pool;
        Ok(self)
    }

    /// Set the inclusive bounds of the nested array length.
    pub fn with_inner_item_range(mut self, min: usize, max: usize) -> Result<Self, GeneratorError> {
        if min == 0 || min > max {
            return Err(GeneratorError::InvalidRange {
                field: "innerItems",
                min: min as u64,
                max: max as u64,
            });
        }
        self.inner_items_min = min;
        self.inner_items_max = max;
        Ok(self)
    }

    /// Get the reference instant dates are generated around.
    pub fn reference(&self) -> DateTime<Utc> {
        self.reference
    }

    /// Generate `count` documents from `seed`.
    ///
    /// Partition keys are `"0"` through `"{count - 1}"`.
    pub fn generate_batch(&self, count: usize, seed: u64) -> Vec<Document> {
        self.documents(count, seed).collect()
    }

    /// Lazily generate `count` documents from `seed`.
    pub fn documents(&self, count: usize, seed: u64) -> DocumentIterator<'_> {
        DocumentIterator {
            factory: self,
            rng: StdRng::seed_from_u64(seed),
            index: 0,
            count,
        }
    }

    fn generate_document<R: Rng>(&self, rng: &mut R, index: usize) -> Document {
        // Exhaustive literal: a field without a rule does not compile.
        let document = Document {
            partition_key: index.to_string(),
            guid_property: generate_uuid_v4(rng),
            bool_property: rng.gen_bool(0.5),
            string_property: generate_lowercase_string(rng, STRING_LENGTH),
            int_property: generate_int_range(rng, 0, INT_MAX),
            date_only_property: generate_past_date(rng, self.reference),
            decimal_property: generate_decimal_range(rng, 0, DECIMAL_MAX, DECIMAL_SCALE),
            id: generate_pooled_id(rng, ID_PREFIX, self.id_pool),
            dictionary_property: DICTIONARY_KEYS
                .iter()
                .map(|key| {
                    (
                        key.to_string(),
                        generate_decimal_range(rng, 0, DECIMAL_MAX, DECIMAL_SCALE),
                    )
                })
                .collect(),
            inner_items: generate_inner_items(
                rng,
                self.reference,
                self.inner_items_min,
                self.inner_items_max,
            ),
        };
        debug_assert!(document.is_complete(), "{:?}", document.missing_fields());
        document
    }
}

/// Iterator that lazily generates the documents of one batch.
pub struct DocumentIterator<'a> {
    factory: &'a DocumentFactory,
    rng: StdRng,
    index: usize,
    count: usize,
}

impl Iterator for DocumentIterator<'_> {
    type Item = Document;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let document = self.factory.generate_document(&mut self.rng, self.index);
        self.index += 1;
        Some(document)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DocumentIterator<'_> {}
