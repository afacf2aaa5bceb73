//! # Domain Model: Cache Records, Captures and Canonical Order
//!
//! This module defines the core data structures for clipstash: [`CacheRecord`],
//! [`RecordKind`] and [`Capture`], plus the two rules every mutation path shares:
//! the duplicate rule and the canonical order.
//!
//! ## Captures
//!
//! The capture side hands the store a [`Capture`], a tagged union with the
//! fields each kind requires:
//!
//! | Variant | Required | Dedup key |
//! |---------|----------|-----------|
//! | `Text`  | `content` | `content` |
//! | `Html`  | `content` (plain-text fallback), `html` | `content` |
//! | `Image` | `data_url`, optional `hash` | `hash`, else `data_url` |
//!
//! A capture whose key is blank is not addable. That is a defined outcome,
//! not an error.
//!
//! ## Duplicate Rule
//!
//! - Text and Html compare `content` by exact string equality, across kinds.
//! - Images compare hashes when both sides have one. When exactly one side has
//!   a hash they are never duplicates. When neither does, the raw data URLs
//!   are compared.
//!
//! ## Canonical Order
//!
//! ```text
//! pinned records     newest pin first    (pinned_at desc)
//! unpinned records   newest first        (created_at desc)
//! ```
//!
//! The order is recomputed and persisted after every insert, pin toggle and
//! import. Sorting is stable, so records inserted at the head keep their place
//! among equal timestamps.
//!
//! ## Eviction
//!
//! [`evict_to`] removes the last non-pinned record of a sorted list until the
//! list fits the bound. Pinned records are never evicted; if only pinned
//! records remain the list is allowed to exceed the bound.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Text,
    Html,
    Image,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Text => "text",
            RecordKind::Html => "html",
            RecordKind::Image => "image",
        }
    }

    /// Parses a wire name. Anything unrecognized reads as `Text`.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "html" => RecordKind::Html,
            "image" => RecordKind::Image,
            _ => RecordKind::Text,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One captured clipboard snapshot, as persisted in the record blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Plain text. For `Html` this is the fallback text, for `Image` it is empty.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
    /// Records imported from older exports may lack a hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Character count of `content`, always 0 for images.
    pub content_length: usize,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub pinned_at: Option<DateTime<Utc>>,
}

/// What a duplicate check compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupProbe<'a> {
    Content(&'a str),
    Image {
        data_url: &'a str,
        hash: Option<&'a str>,
    },
}

impl CacheRecord {
    /// The probe this record presents when it is the candidate being inserted.
    pub fn probe(&self) -> DedupProbe<'_> {
        match (self.kind, self.image_data_url.as_deref()) {
            (RecordKind::Image, Some(data_url)) if !data_url.is_empty() => DedupProbe::Image {
                data_url,
                hash: present_hash(self.image_hash.as_deref()),
            },
            _ => DedupProbe::Content(&self.content),
        }
    }

    pub fn is_duplicate_of(&self, probe: &DedupProbe<'_>) -> bool {
        match *probe {
            DedupProbe::Content(content) => self.content == content,
            DedupProbe::Image { data_url, hash } => {
                let own_hash = present_hash(self.image_hash.as_deref());
                match (hash, own_hash) {
                    (Some(theirs), Some(ours)) => theirs == ours,
                    (Some(_), None) | (None, Some(_)) => false,
                    (None, None) => self.image_data_url.as_deref() == Some(data_url),
                }
            }
        }
    }

    /// A record with neither text nor image data is never persisted.
    pub fn has_payload(&self) -> bool {
        !self.content.is_empty()
            || self
                .image_data_url
                .as_deref()
                .is_some_and(|url| !url.is_empty())
    }

    /// Case-insensitive substring match on content or any tag.
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Payload handed over by the capture side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    Text { content: String },
    Html { content: String, html: String },
    Image { data_url: String, hash: Option<String> },
}

impl Capture {
    pub fn text(content: impl Into<String>) -> Self {
        Capture::Text {
            content: content.into(),
        }
    }

    pub fn html(content: impl Into<String>, html: impl Into<String>) -> Self {
        Capture::Html {
            content: content.into(),
            html: html.into(),
        }
    }

    /// A blank hash string is treated as no hash.
    pub fn image(data_url: impl Into<String>, hash: Option<String>) -> Self {
        Capture::Image {
            data_url: data_url.into(),
            hash: hash.filter(|h| !h.trim().is_empty()),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Capture::Text { .. } => RecordKind::Text,
            Capture::Html { .. } => RecordKind::Html,
            Capture::Image { .. } => RecordKind::Image,
        }
    }

    /// The dedup key, or `None` when the capture is blank.
    ///
    /// Images need a data URL to be stored at all, so an image with a hash
    /// but no data URL is also blank. A blank hash falls back to the data URL.
    pub fn dedup_key(&self) -> Option<&str> {
        let key = match self {
            Capture::Text { content } | Capture::Html { content, .. } => content.as_str(),
            Capture::Image { data_url, hash } => {
                if data_url.trim().is_empty() {
                    return None;
                }
                present_hash(hash.as_deref()).unwrap_or(data_url)
            }
        };
        if key.trim().is_empty() {
            None
        } else {
            Some(key)
        }
    }

    pub fn probe(&self) -> DedupProbe<'_> {
        match self {
            Capture::Text { content } | Capture::Html { content, .. } => {
                DedupProbe::Content(content)
            }
            Capture::Image { data_url, hash } => DedupProbe::Image {
                data_url,
                hash: present_hash(hash.as_deref()),
            },
        }
    }

    pub fn into_record(self, id: String, now: DateTime<Utc>) -> CacheRecord {
        let kind = self.kind();
        let (content, html_content, image_data_url, image_hash) = match self {
            Capture::Text { content } => (content, None, None, None),
            Capture::Html { content, html } => (content, Some(html), None, None),
            Capture::Image { data_url, hash } => {
                let hash = hash.filter(|h| !h.trim().is_empty());
                (String::new(), None, Some(data_url), hash)
            }
        };
        CacheRecord {
            id,
            kind,
            content_length: char_count(kind, &content),
            content,
            html_content,
            image_data_url,
            image_hash,
            created_at: now,
            tags: Vec::new(),
            pinned: false,
            pinned_at: None,
        }
    }
}

/// Blank image hashes count as absent.
fn present_hash(hash: Option<&str>) -> Option<&str> {
    hash.filter(|h| !h.trim().is_empty())
}

/// Logical character count, 0 for images.
pub fn char_count(kind: RecordKind, content: &str) -> usize {
    match kind {
        RecordKind::Image => 0,
        _ => content.chars().count(),
    }
}

/// Generates `"{epoch_ms}_{8 hex chars}"`.
pub fn generate_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", now.timestamp_millis(), &suffix[..8])
}

/// Generates an id not already used by `existing`.
pub fn fresh_id(existing: &[CacheRecord], now: DateTime<Utc>) -> String {
    loop {
        let id = generate_id(now);
        if !existing.iter().any(|r| r.id == id) {
            return id;
        }
    }
}

pub fn canonical_cmp(a: &CacheRecord, b: &CacheRecord) -> Ordering {
    match (a.pinned, b.pinned) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => b.pinned_at.cmp(&a.pinned_at),
        (false, false) => b.created_at.cmp(&a.created_at),
    }
}

pub fn sort_records(records: &mut [CacheRecord]) {
    records.sort_by(canonical_cmp);
}

/// Removes the oldest non-pinned records of a sorted list until it holds at
/// most `max` records, or only pinned records are left. Returns what was removed.
pub fn evict_to(records: &mut Vec<CacheRecord>, max: usize) -> Vec<CacheRecord> {
    let mut evicted = Vec::new();
    while records.len() > max {
        match records.iter().rposition(|r| !r.pinned) {
            Some(idx) => evicted.push(records.remove(idx)),
            None => break,
        }
    }
    evicted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn record(id: &str, created: i64, pinned_at: Option<i64>) -> CacheRecord {
        let mut rec = Capture::text(id).into_record(id.to_string(), at(created));
        if let Some(p) = pinned_at {
            rec.pinned = true;
            rec.pinned_at = Some(at(p));
        }
        rec
    }

    fn ids(records: &[CacheRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_generate_id_format() {
        let id = generate_id(at(1_700_000_000_000));
        let (prefix, suffix) = id.split_once('_').unwrap();
        assert_eq!(prefix, "1700000000000");
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_content_length_counts_chars_not_bytes() {
        let rec = Capture::text("héllo 世界 🎉").into_record("a".into(), Utc::now());
        assert_eq!(rec.content_length, 10);
    }

    #[test]
    fn test_image_record_has_zero_length_and_empty_content() {
        let rec = Capture::image("data:image/png;base64,AAAA", Some("abc".into()))
            .into_record("a".into(), Utc::now());
        assert_eq!(rec.kind, RecordKind::Image);
        assert_eq!(rec.content, "");
        assert_eq!(rec.content_length, 0);
        assert_eq!(rec.image_hash.as_deref(), Some("abc"));
    }

    #[test]
    fn test_html_record_keeps_html_and_fallback() {
        let rec = Capture::html("bold", "<b>bold</b>").into_record("a".into(), Utc::now());
        assert_eq!(rec.content, "bold");
        assert_eq!(rec.html_content.as_deref(), Some("<b>bold</b>"));
        assert!(rec.image_data_url.is_none());
    }

    #[test]
    fn test_blank_captures_have_no_key() {
        assert_eq!(Capture::text("   \n").dedup_key(), None);
        assert_eq!(Capture::html("", "<p></p>").dedup_key(), None);
        assert_eq!(Capture::image("", Some("hash".into())).dedup_key(), None);
        assert_eq!(Capture::text(" x ").dedup_key(), Some(" x "));
    }

    #[test]
    fn test_image_key_prefers_hash() {
        let cap = Capture::image("data:x", Some("h1".into()));
        assert_eq!(cap.dedup_key(), Some("h1"));
        let cap = Capture::image("data:x", Some(String::new()));
        assert_eq!(cap.dedup_key(), Some("data:x"));
    }

    #[test]
    fn test_blank_hash_on_literal_image_falls_back_to_data_url() {
        for blank in ["", "   "] {
            let cap = Capture::Image {
                data_url: "data:x".into(),
                hash: Some(blank.into()),
            };
            assert_eq!(cap.dedup_key(), Some("data:x"));
            assert_eq!(
                cap.probe(),
                DedupProbe::Image {
                    data_url: "data:x",
                    hash: None
                }
            );
            let rec = cap.into_record("1".into(), Utc::now());
            assert_eq!(rec.image_hash, None);
        }
    }

    #[test]
    fn test_image_duplicate_rule() {
        let hashed = Capture::image("data:a", Some("h".into())).into_record("1".into(), Utc::now());
        let unhashed = Capture::image("data:a", None).into_record("2".into(), Utc::now());

        let same_hash = Capture::image("data:b", Some("h".into()));
        assert!(hashed.is_duplicate_of(&same_hash.probe()));

        let no_hash = Capture::image("data:a", None);
        assert!(!hashed.is_duplicate_of(&no_hash.probe()));
        assert!(unhashed.is_duplicate_of(&no_hash.probe()));

        let with_hash = Capture::image("data:a", Some("h".into()));
        assert!(!unhashed.is_duplicate_of(&with_hash.probe()));
    }

    #[test]
    fn test_text_duplicate_crosses_kinds() {
        let html = Capture::html("same", "<i>same</i>").into_record("1".into(), Utc::now());
        assert!(html.is_duplicate_of(&Capture::text("same").probe()));
        assert!(!html.is_duplicate_of(&Capture::text("Same").probe()));
    }

    #[test]
    fn test_canonical_order() {
        let mut records = vec![
            record("old", 100, None),
            record("pin-early", 50, Some(1_000)),
            record("new", 300, None),
            record("pin-late", 10, Some(2_000)),
            record("mid", 200, None),
        ];
        sort_records(&mut records);
        assert_eq!(
            ids(&records),
            vec!["pin-late", "pin-early", "new", "mid", "old"]
        );
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let mut records = vec![record("a", 100, None), record("b", 100, None)];
        sort_records(&mut records);
        assert_eq!(ids(&records), vec!["a", "b"]);
    }

    #[test]
    fn test_evict_skips_pinned() {
        let mut records = vec![
            record("p", 0, Some(5)),
            record("new", 300, None),
            record("old", 100, None),
        ];
        let evicted = evict_to(&mut records, 2);
        assert_eq!(ids(&evicted), vec!["old"]);
        assert_eq!(ids(&records), vec!["p", "new"]);
    }

    #[test]
    fn test_evict_stops_when_only_pinned_remain() {
        let mut records = vec![record("p1", 0, Some(9)), record("p2", 0, Some(8))];
        records.push(record("u", 1, None));
        let evicted = evict_to(&mut records, 1);
        assert_eq!(ids(&evicted), vec!["u"]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_matches_query_on_content_and_tags() {
        let mut rec = record("hello world", 0, None);
        assert!(rec.matches_query("world"));
        assert!(!rec.matches_query("voi"));
        rec.tags = vec!["Invoice".into()];
        assert!(rec.matches_query("voi"));
    }

    #[test]
    fn test_internal_blob_uses_camel_case_and_epoch_millis() {
        let mut rec = record("x", 1_000, Some(2_000));
        rec.pinned_at = Some(at(2_000) + Duration::milliseconds(1));
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["createdAt"], 1_000);
        assert_eq!(json["pinnedAt"], 2_001);
        assert_eq!(json["contentLength"], 1);
        assert_eq!(json["type"], "text");
        assert!(json.get("htmlContent").is_none());

        let back: CacheRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_unknown_wire_kind_reads_as_text() {
        assert_eq!(RecordKind::from_wire("image"), RecordKind::Image);
        assert_eq!(RecordKind::from_wire("rtf"), RecordKind::Text);
    }
}
