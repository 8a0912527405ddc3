//! Record codec between entries and table attribute maps

use crate::domain::Entry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typed attribute value, serialized as `{"S": ".."}` or `{"SS": [..]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    SS(Vec<String>),
}

/// A table record: attribute name to value
pub type Record = BTreeMap<String, AttributeValue>;

pub fn encode_entry(entry: &Entry) -> Record {
    let mut record = Record::new();
    record.insert("id".into(), AttributeValue::S(entry.id.clone()));
    record.insert("date".into(), AttributeValue::S(entry.date.clone()));
    record.insert("title".into(), AttributeValue::S(entry.title.clone()));
    record.insert("content".into(), AttributeValue::S(entry.content.clone()));
    record.insert("tags".into(), AttributeValue::SS(entry.tags.clone()));
    record.insert(
        "createdAt".into(),
        AttributeValue::S(entry.created_at.clone()),
    );
    record.insert(
        "updatedAt".into(),
        AttributeValue::S(entry.updated_at.clone()),
    );
    record
}

/// Decode a record, defaulting missing or mistyped attributes to empty values
pub fn decode_entry(record: &Record) -> Entry {
    Entry {
        id: string_attr(record, "id"),
        title: string_attr(record, "title"),
        content: string_attr(record, "content"),
        tags: match record.get("tags") {
            Some(AttributeValue::SS(tags)) => tags.clone(),
            _ => Vec::new(),
        },
        date: string_attr(record, "date"),
        created_at: string_attr(record, "createdAt"),
        updated_at: string_attr(record, "updatedAt"),
    }
}

fn string_attr(record: &Record, name: &str) -> String {
    match record.get(name) {
        Some(AttributeValue::S(value)) => value.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entry {
        Entry {
            id: "entry-1".to_string(),
            title: "Cena".to_string(),
            content: "Sopa".to_string(),
            tags: vec!["cena".to_string(), "cena".to_string()],
            date: "2025-01-17".to_string(),
            created_at: "2025-01-17T20:00:00.000Z".to_string(),
            updated_at: "2025-01-17T21:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_encode_layout() {
        let json = serde_json::to_value(encode_entry(&sample())).unwrap();
        assert_eq!(json["id"]["S"], "entry-1");
        assert_eq!(json["createdAt"]["S"], "2025-01-17T20:00:00.000Z");
        assert_eq!(json["tags"]["SS"][1], "cena");
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_decode_keeps_every_field() {
        assert_eq!(decode_entry(&encode_entry(&sample())), sample());
    }

    #[test]
    fn test_decode_defaults_missing_attributes() {
        let record: Record =
            serde_json::from_str(r#"{"id": {"S": "entry-9"}, "tags": {"S": "oops"}}"#).unwrap();
        let entry = decode_entry(&record);
        assert_eq!(entry.id, "entry-9");
        assert_eq!(entry.title, "");
        assert_eq!(entry.created_at, "");
        assert!(entry.tags.is_empty());
    }
}
