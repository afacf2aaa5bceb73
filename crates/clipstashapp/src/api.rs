//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for capture and presentation clients alike.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Validates at the boundary**: tag lists are normalized, the cache bound
//!   is range-checked, before the store sees them
//! - **Returns structured types** ([`AddOutcome`], [`ImportSummary`],
//!   [`StorageStats`], [`PinState`])
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **Terminal I/O**: No stdout, stderr, or formatting
//!
//! ## Pin Toggle Results
//!
//! [`commands::pinning::toggle`] keeps the historical contract where an
//! unknown id and "now unpinned" both read as `false`. The facade reports
//! [`PinState::NotFound`] separately instead; clients written against the
//! boolean contract can call the command directly.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `ClipStashApi<FsBackend>` (see [`ClipStashApi::open`])
//! - Testing: `ClipStashApi<MemBackend>`

use crate::commands::{
    self, capture, delete, export, import, pinning, preferences, search, stats, tagging,
    AddOutcome, ImportSummary, StorageStats,
};
use crate::error::{ClipError, Result};
use crate::model::{CacheRecord, Capture};
use crate::settings::{validate_max_cache_size, Language, Settings, SettingsPatch, Theme};
use crate::store::backend::StorageBackend;
use crate::store::fs_backend::FsBackend;
use crate::store::RecordStore;
use crate::tags::{normalize_tags, validate_tag};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinState {
    Pinned,
    Unpinned,
    NotFound,
}

/// The main API facade for clipstash operations.
pub struct ClipStashApi<B: StorageBackend> {
    store: RecordStore<B>,
}

impl ClipStashApi<FsBackend> {
    /// Open the file-backed store rooted at `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        tracing::debug!(path = %data_dir.display(), "opening store");
        Self::with_backend(FsBackend::new(data_dir))
    }
}

impl<B: StorageBackend> ClipStashApi<B> {
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn with_backend(backend: B) -> Self {
        Self::new(RecordStore::with_backend(backend))
    }

    // --- Capture ---

    pub fn add_cache(&mut self, capture: Capture) -> Result<AddOutcome> {
        capture::run(&mut self.store, capture)
    }

    // --- Listing ---

    pub fn get_caches(&self) -> Result<Vec<CacheRecord>> {
        search::all(&self.store)
    }

    pub fn get_cache(&self, id: &str) -> Result<Option<CacheRecord>> {
        search::get(&self.store, id)
    }

    pub fn search_caches(&self, query: &str) -> Result<Vec<CacheRecord>> {
        search::run(&self.store, query)
    }

    // --- Mutations ---

    pub fn remove_cache(&mut self, id: &str) -> Result<bool> {
        delete::remove(&mut self.store, id)
    }

    pub fn clear_all_caches(&mut self) -> Result<()> {
        delete::clear(&mut self.store)
    }

    pub fn toggle_pin(&mut self, id: &str) -> Result<PinState> {
        Ok(match pinning::toggle_checked(&mut self.store, id)? {
            Some(true) => PinState::Pinned,
            Some(false) => PinState::Unpinned,
            None => PinState::NotFound,
        })
    }

    // --- Tags ---

    /// Replace the tags of `id` with the normalized form of `tags`.
    pub fn update_cache_tags<I, S>(&mut self, id: &str, tags: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = normalize_tags(tags).map_err(|e| ClipError::InvalidTag(e.to_string()))?;
        tagging::update_tags(&mut self.store, id, tags)
    }

    /// Append one tag unless the record already has it.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<bool> {
        let tag = validate_tag(tag).map_err(|e| ClipError::InvalidTag(e.to_string()))?;
        let Some(record) = self.get_cache(id)? else {
            return Ok(false);
        };
        let mut tags = record.tags;
        if tags.iter().any(|t| t == tag) {
            return Ok(true);
        }
        tags.push(tag.to_string());
        tagging::update_tags(&mut self.store, id, tags)
    }

    pub fn remove_tag(&mut self, id: &str, tag: &str) -> Result<bool> {
        let Some(record) = self.get_cache(id)? else {
            return Ok(false);
        };
        let tags = record.tags.into_iter().filter(|t| t != tag).collect();
        tagging::update_tags(&mut self.store, id, tags)
    }

    pub fn all_tags(&self) -> Result<Vec<String>> {
        tagging::all_tags(&self.store)
    }

    // --- Stats, Export, Import ---

    pub fn storage_stats(&self) -> Result<StorageStats> {
        stats::run(&self.store)
    }

    pub fn export_caches(&self) -> Result<String> {
        export::run(&self.store)
    }

    pub fn import_caches(&mut self, document: &str) -> Result<ImportSummary> {
        import::run(&mut self.store, document)
    }

    // --- Preferences ---

    pub fn settings(&self) -> Result<Settings> {
        preferences::settings(&self.store)
    }

    /// Set the cache bound; must be within `[10, 999]`.
    pub fn set_max_cache_size(&mut self, size: usize) -> Result<Settings> {
        let size = validate_max_cache_size(size)?;
        preferences::save_settings(&mut self.store, &SettingsPatch::max_cache_size(size))
    }

    pub fn theme(&self) -> Result<Theme> {
        preferences::theme(&self.store)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        preferences::save_theme(&mut self.store, theme)
    }

    pub fn language(&self) -> Result<Language> {
        preferences::language(&self.store)
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        preferences::save_language(&mut self.store, language)
    }
}

/// Default file name for an export taken now.
pub fn export_filename() -> String {
    commands::export::default_filename(chrono::Utc::now())
}
