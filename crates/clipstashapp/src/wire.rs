//! # Export Wire Format
//!
//! Exported files are UTF-8 JSON documents meant to survive both a move to
//! another installation and internal renames of record fields:
//!
//! ```json
//! {
//!   "version": 1,
//!   "exported_at": 1700000000000,
//!   "app": "ClipStash",
//!   "records": [
//!     {
//!       "id": "1700000000000_3f2a9c1b",
//!       "type": "html",
//!       "content": "plain fallback",
//!       "created_at": 1700000000000,
//!       "content_length": 14,
//!       "tags": ["work"],
//!       "pinned": false,
//!       "pinned_at": 0,
//!       "html_content": "<p>plain fallback</p>"
//!     }
//!   ]
//! }
//! ```
//!
//! The external names are fixed here and mapped to [`CacheRecord`] by hand,
//! so the internal shape can change without breaking old files. Optional
//! fields (`html_content`, `image_data_url`, `image_hash`) are omitted when
//! absent. Timestamps are epoch milliseconds; `pinned_at` is `0` when unpinned.
//!
//! ## Reading
//!
//! Import accepts the wrapped `{"records": [...]}` document or a bare list.
//! Records are read field by field from untyped JSON, so a defect in one
//! record never rejects the document:
//!
//! - missing or `0` `created_at` → import time
//! - missing or `0` `content_length` → recomputed
//! - `tags` that is not a list → empty; non-string entries and repeats dropped
//! - missing `type` or an unknown one → `text`
//! - fields that do not belong to the record's kind are dropped

use crate::error::{ClipError, Result};
use crate::model::{char_count, fresh_id, CacheRecord, RecordKind};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const EXPORT_VERSION: u32 = 1;
pub const APP_NAME: &str = "ClipStash";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: u32,
    pub exported_at: i64,
    pub app: String,
    pub records: Vec<ExternalRecord>,
}

impl ExportDocument {
    pub fn new(records: &[CacheRecord], exported_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: exported_at.timestamp_millis(),
            app: APP_NAME.to_string(),
            records: records.iter().map(ExternalRecord::from).collect(),
        }
    }
}

/// A record in its exported, snake_cased form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub content: String,
    pub created_at: i64,
    pub content_length: usize,
    pub tags: Vec<String>,
    pub pinned: bool,
    pub pinned_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

impl From<&CacheRecord> for ExternalRecord {
    fn from(rec: &CacheRecord) -> Self {
        Self {
            id: rec.id.clone(),
            kind: rec.kind,
            content: rec.content.clone(),
            created_at: rec.created_at.timestamp_millis(),
            content_length: rec.content_length,
            tags: rec.tags.clone(),
            pinned: rec.pinned,
            pinned_at: rec.pinned_at.map(|t| t.timestamp_millis()).unwrap_or(0),
            html_content: non_empty(&rec.html_content),
            image_data_url: non_empty(&rec.image_data_url),
            image_hash: non_empty(&rec.image_hash),
        }
    }
}

/// Extract the raw record list from an import document.
pub fn parse_document(text: &str) -> Result<Vec<Value>> {
    let parsed: Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!(error = %e, "import document is not valid JSON");
        ClipError::InvalidFormat
    })?;
    match parsed {
        Value::Array(records) => Ok(records),
        Value::Object(mut doc) => match doc.remove("records") {
            Some(Value::Array(records)) => Ok(records),
            _ => {
                tracing::debug!("import document has no records list");
                Err(ClipError::InvalidFormat)
            }
        },
        _ => {
            tracing::debug!("import document is neither an object nor a list");
            Err(ClipError::InvalidFormat)
        }
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn millis_field(obj: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let value = obj.get(key)?;
    let ms = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .filter(|ms| *ms > 0)?;
    Utc.timestamp_millis_opt(ms).single()
}

fn tags_field(obj: &Map<String, Value>) -> Vec<String> {
    let Some(Value::Array(items)) = obj.get("tags") else {
        return Vec::new();
    };
    let mut tags: Vec<String> = Vec::new();
    for tag in items.iter().filter_map(Value::as_str) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Rebuild an internal record from one raw external record.
///
/// `taken` holds the records already in the store (plus those imported
/// earlier in this call); an exported id that collides with one of them, or a
/// missing id, gets a fresh one. Returns `None` for records with no payload.
pub fn from_external(
    raw: &Value,
    taken: &[CacheRecord],
    now: DateTime<Utc>,
) -> Option<CacheRecord> {
    let obj = raw.as_object()?;

    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .map(RecordKind::from_wire)
        .unwrap_or_default();
    let content = obj
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let (html_content, image_data_url, image_hash) = match kind {
        RecordKind::Text => (None, None, None),
        RecordKind::Html => (text_field(obj, "html_content"), None, None),
        RecordKind::Image => (
            None,
            text_field(obj, "image_data_url"),
            text_field(obj, "image_hash").filter(|h| !h.trim().is_empty()),
        ),
    };

    let content_length = match kind {
        RecordKind::Image => 0,
        _ => obj
            .get("content_length")
            .and_then(Value::as_u64)
            .filter(|len| *len > 0)
            .map(|len| len as usize)
            .unwrap_or_else(|| char_count(kind, &content)),
    };

    let pinned = obj.get("pinned").and_then(Value::as_bool).unwrap_or(false);
    let pinned_at = if pinned {
        millis_field(obj, "pinned_at")
    } else {
        None
    };

    let id = match text_field(obj, "id") {
        Some(id) if !taken.iter().any(|r| r.id == id) => id,
        _ => fresh_id(taken, now),
    };

    let record = CacheRecord {
        id,
        kind,
        content,
        html_content,
        image_data_url,
        image_hash,
        created_at: millis_field(obj, "created_at").unwrap_or(now),
        content_length,
        tags: tags_field(obj),
        pinned,
        pinned_at,
    };

    record.has_payload().then_some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Capture;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(5_000).unwrap()
    }

    #[test]
    fn test_external_record_omits_absent_optionals() {
        let rec = Capture::text("plain").into_record("1_a".into(), now());
        let value = serde_json::to_value(ExternalRecord::from(&rec)).unwrap();
        assert_eq!(value["created_at"], 5_000);
        assert_eq!(value["content_length"], 5);
        assert_eq!(value["pinned_at"], 0);
        assert!(value.get("html_content").is_none());
        assert!(value.get("image_data_url").is_none());
        assert!(value.get("image_hash").is_none());
        assert!(value.get("createdAt").is_none());
    }

    #[test]
    fn test_external_record_keeps_image_fields() {
        let rec = Capture::image("data:image/png;base64,AA", Some("beef".into()))
            .into_record("1_a".into(), now());
        let value = serde_json::to_value(ExternalRecord::from(&rec)).unwrap();
        assert_eq!(value["type"], "image");
        assert_eq!(value["image_data_url"], "data:image/png;base64,AA");
        assert_eq!(value["image_hash"], "beef");
    }

    #[test]
    fn test_document_header() {
        let doc = ExportDocument::new(&[], now());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["app"], "ClipStash");
        assert_eq!(value["exported_at"], 5_000);
        assert_eq!(value["records"], json!([]));
    }

    #[test]
    fn test_parse_document_shapes() {
        assert_eq!(parse_document(r#"{"records":[{}]}"#).unwrap().len(), 1);
        assert_eq!(parse_document(r#"[{}, {}]"#).unwrap().len(), 2);
        assert!(matches!(
            parse_document(r#"{"items":[]}"#),
            Err(ClipError::InvalidFormat)
        ));
        assert!(matches!(
            parse_document(r#"{"records":"nope"}"#),
            Err(ClipError::InvalidFormat)
        ));
        assert!(matches!(parse_document("42"), Err(ClipError::InvalidFormat)));
        assert!(matches!(
            parse_document("not json"),
            Err(ClipError::InvalidFormat)
        ));
    }

    #[test]
    fn test_from_external_defaults() {
        let raw = json!({ "content": "héllo", "tags": "oops" });
        let rec = from_external(&raw, &[], now()).unwrap();
        assert_eq!(rec.kind, RecordKind::Text);
        assert_eq!(rec.created_at, now());
        assert_eq!(rec.content_length, 5);
        assert!(rec.tags.is_empty());
        assert!(!rec.pinned);
        assert!(rec.pinned_at.is_none());
        assert!(rec.id.starts_with("5000_"));
    }

    #[test]
    fn test_from_external_zero_values_are_unset() {
        let raw = json!({ "content": "héllo", "created_at": 0, "content_length": 0 });
        let rec = from_external(&raw, &[], now()).unwrap();
        assert_eq!(rec.created_at, now());
        assert_eq!(rec.content_length, 5);
    }

    #[test]
    fn test_from_external_wrong_types_fall_back() {
        let raw = json!({
            "id": 42,
            "type": 7,
            "content": "x",
            "created_at": "x",
            "content_length": "lots",
            "tags": [1, 2],
            "pinned": "yes",
            "pinned_at": 222
        });
        let rec = from_external(&raw, &[], now()).unwrap();
        assert_eq!(rec.kind, RecordKind::Text);
        assert_eq!(rec.created_at, now());
        assert_eq!(rec.content_length, 1);
        assert!(rec.tags.is_empty());
        assert!(!rec.pinned);
        assert!(rec.pinned_at.is_none());
        assert!(rec.id.starts_with("5000_"));
    }

    #[test]
    fn test_from_external_pinned_without_pin_time() {
        let raw = json!({ "content": "x", "pinned": true });
        let rec = from_external(&raw, &[], now()).unwrap();
        assert!(rec.pinned);
        assert!(rec.pinned_at.is_none());
    }

    #[test]
    fn test_from_external_blank_image_hash_is_dropped() {
        let raw = json!({ "type": "image", "image_data_url": "data:x", "image_hash": "  " });
        let rec = from_external(&raw, &[], now()).unwrap();
        assert!(rec.image_hash.is_none());
    }

    #[test]
    fn test_from_external_keeps_exported_fields() {
        let raw = json!({
            "id": "111_abcdef01",
            "type": "html",
            "content": "x",
            "created_at": 111,
            "content_length": 1,
            "tags": ["a", 3, "a", "b"],
            "pinned": true,
            "pinned_at": 222,
            "html_content": "<b>x</b>",
            "image_data_url": "data:stray"
        });
        let rec = from_external(&raw, &[], now()).unwrap();
        assert_eq!(rec.id, "111_abcdef01");
        assert_eq!(rec.kind, RecordKind::Html);
        assert_eq!(rec.created_at.timestamp_millis(), 111);
        assert_eq!(rec.tags, vec!["a", "b"]);
        assert!(rec.pinned);
        assert_eq!(rec.pinned_at.unwrap().timestamp_millis(), 222);
        assert_eq!(rec.html_content.as_deref(), Some("<b>x</b>"));
        assert!(rec.image_data_url.is_none());
    }

    #[test]
    fn test_from_external_replaces_colliding_id() {
        let existing = Capture::text("other").into_record("111_abcdef01".into(), now());
        let raw = json!({ "id": "111_abcdef01", "content": "x" });
        let rec = from_external(&raw, std::slice::from_ref(&existing), now()).unwrap();
        assert_ne!(rec.id, "111_abcdef01");
    }

    #[test]
    fn test_from_external_skips_empty_records() {
        assert!(from_external(&json!({ "content": "" }), &[], now()).is_none());
        assert!(from_external(&json!({ "type": "image" }), &[], now()).is_none());
        assert!(from_external(&json!("just a string"), &[], now()).is_none());
    }

    #[test]
    fn test_from_external_image_without_hash() {
        let raw = json!({ "type": "image", "image_data_url": "data:x", "content_length": 9 });
        let rec = from_external(&raw, &[], now()).unwrap();
        assert_eq!(rec.kind, RecordKind::Image);
        assert!(rec.image_hash.is_none());
        assert_eq!(rec.content_length, 0);
    }
}
