//! # Command Layer
//!
//! This module contains the **core business logic** of clipstash. Each
//! operation family lives in its own submodule as plain functions over a
//! [`RecordStore`](crate::store::RecordStore).
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Load the record blob, apply one mutation in memory, persist once
//! - Recompute canonical order and apply eviction where the operation requires it
//! - Return structured values ([`AddOutcome`], [`ImportSummary`], ...)
//! - Are completely UI-agnostic
//!
//! ## Defined Outcomes vs Errors
//!
//! Blank captures and unknown ids are not errors. They come back as `false`
//! or as an [`AddOutcome`] with `added == false`, and callers must check.
//! `Err` is reserved for storage failures and malformed import documents.
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests run
//! against `MemBackend` so no filesystem is involved.
//!
//! ## Command Modules
//!
//! - [`capture`]: Add a captured payload (dedup, insert, evict)
//! - [`delete`]: Remove one record or clear the store
//! - [`pinning`]: Toggle pin state
//! - [`tagging`]: Replace a record's tags, list all tags
//! - [`search`]: Canonical listing and substring search
//! - [`stats`]: Storage statistics
//! - [`export`]: Serialize the store to the wire format
//! - [`import`]: Merge a wire document into the store
//! - [`preferences`]: Settings, theme and language

use serde::Serialize;

pub mod capture;
pub mod delete;
pub mod export;
pub mod import;
pub mod pinning;
pub mod preferences;
pub mod search;
pub mod stats;
pub mod tagging;

/// Result of adding a capture.
///
/// `added == false && duplicate == false` means the capture was blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AddOutcome {
    pub added: bool,
    pub duplicate: bool,
}

impl AddOutcome {
    pub fn added() -> Self {
        Self {
            added: true,
            duplicate: false,
        }
    }

    pub fn duplicate() -> Self {
        Self {
            added: false,
            duplicate: true,
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }
}

/// Counts reported by an import. Records skipped for having no payload are
/// in neither `added` nor `duplicates`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub added: usize,
    pub duplicates: usize,
}

impl ImportSummary {
    pub fn skipped(&self) -> usize {
        self.total - self.added - self.duplicates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStats {
    pub count: usize,
    pub max_count: usize,
    pub total_bytes: u64,
    pub formatted_size: String,
}
