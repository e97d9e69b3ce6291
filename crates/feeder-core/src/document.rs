//! Document schema written by the feeder.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Keys always present in [`Document::dictionary_property`].
pub const DICTIONARY_KEYS: [&str; 3] = ["ABC", "DEF", "GHI"];

/// Nested sub-document carried in [`Document::inner_items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerDocument {
    pub id: Uuid,
    pub date_created: DateTime<Utc>,
    pub test_flag: bool,
}

/// A single generated document.
///
/// `id` is drawn from a small pool, so several documents of one batch may
/// share it. `partition_key` is unique within a batch. Stores key documents
/// by the `(id, partition_key)` pair and overwrite on repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub partition_key: String,
    pub guid_property: Uuid,
    pub bool_property: bool,
    pub string_property: String,
    pub int_property: i32,
    pub date_only_property: NaiveDate,
    pub decimal_property: Decimal,
    pub dictionary_property: BTreeMap<String, Decimal>,
    pub inner_items: Vec<InnerDocument>,
}

impl Document {
    /// Names of fields left at an empty sentinel value.
    ///
    /// Scalars without a sentinel (bools, integers, dates, decimals) are
    /// always considered populated.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.is_empty() {
            missing.push("id");
        }
        if self.partition_key.is_empty() {
            missing.push("partitionKey");
        }
        if self.guid_property.is_nil() {
            missing.push("guidProperty");
        }
        if self.string_property.is_empty() {
            missing.push("stringProperty");
        }
        if DICTIONARY_KEYS
            .iter()
            .any(|key| !self.dictionary_property.contains_key(*key))
        {
            missing.push("dictionaryProperty");
        }
        if self.inner_items.is_empty() {
            missing.push("innerItems");
        }
        if self.inner_items.iter().any(|item| item.id.is_nil()) {
            missing.push("innerItems.id");
        }
        missing
    }

    /// Whether every field carries a non-sentinel value.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}
