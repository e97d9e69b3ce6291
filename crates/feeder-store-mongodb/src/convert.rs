//! Conversion of feeder documents to BSON.

use bson::{doc, Document as BsonDocument};
use feeder_core::Document;
use feeder_store::StoreError;

/// Serialize `document` to BSON with `partitionKey` forced to `partition_key`.
pub fn to_bson_document(
    document: &Document,
    partition_key: &str,
) -> Result<BsonDocument, StoreError> {
    let mut bson = bson::to_document(document)
        .map_err(|e| StoreError::Other(format!("Failed to serialize document: {e}")))?;
    bson.insert("partitionKey", partition_key);
    Ok(bson)
}

/// Filter selecting the stored copy of `document` under `partition_key`.
pub fn document_filter(document: &Document, partition_key: &str) -> BsonDocument {
    doc! {
        "id": document.id.as_str(),
        "partitionKey": partition_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use feeder_core::{InnerDocument, DICTIONARY_KEYS};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn sample_document() -> Document {
        Document {
            id: "SomeId-7".to_string(),
            partition_key: "12".to_string(),
            guid_property: Uuid::new_v4(),
            bool_property: true,
            string_property: "qwertyuiop".to_string(),
            int_property: 31337,
            date_only_property: NaiveDate::from_ymd_opt(2023, 12, 24).unwrap(),
            decimal_property: Decimal::new(99_5000, 4),
            dictionary_property: DICTIONARY_KEYS
                .iter()
                .map(|key| (key.to_string(), Decimal::TEN))
                .collect(),
            inner_items: (0..3)
                .map(|_| InnerDocument {
                    id: Uuid::new_v4(),
                    date_created: Utc.with_ymd_and_hms(2025, 5, 5, 5, 5, 5).unwrap(),
                    test_flag: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_to_bson_document() {
        let bson = to_bson_document(&sample_document(), "12").unwrap();

        assert_eq!(bson.get_str("id").unwrap(), "SomeId-7");
        assert_eq!(bson.get_str("partitionKey").unwrap(), "12");
        assert_eq!(bson.get_str("stringProperty").unwrap(), "qwertyuiop");
        assert_eq!(bson.get_i32("intProperty").unwrap(), 31337);
        assert!(bson.get_bool("boolProperty").unwrap());
        assert_eq!(bson.get_array("innerItems").unwrap().len(), 3);
        assert_eq!(bson.get_document("dictionaryProperty").unwrap().len(), 3);
    }

    #[test]
    fn test_partition_key_override() {
        let bson = to_bson_document(&sample_document(), "99").unwrap();
        assert_eq!(bson.get_str("partitionKey").unwrap(), "99");
    }

    #[test]
    fn test_document_filter() {
        let filter = document_filter(&sample_document(), "12");

        assert_eq!(filter.len(), 2);
        assert_eq!(filter.get_str("id").unwrap(), "SomeId-7");
        assert_eq!(filter.get_str("partitionKey").unwrap(), "12");
    }
}
