//! # ClipStash Architecture
//!
//! ClipStash is a **clipboard history store**: a bounded, deduplicated list of
//! captured text, HTML and image entries, with pinning, free-form tags, search,
//! usage stats and a portable export format.
//!
//! The library knows nothing about where captures come from or how they are
//! shown. The `clipstash` binary is one client; a background watcher or a
//! popup UI would be others, all sharing the same store.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (e.g. the clipstash CLI)                            │
//! │  - Reads the clipboard, parses arguments, renders output    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Boundary validation (tags, cache bound)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Dedup, ordering, eviction, import reconciliation         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: string blobs under string keys     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! After every write the stored list:
//! - is ordered pinned-first (most recently pinned first), then newest first
//! - holds no two entries that are duplicates under the duplicate rule in
//!   [`model`]: equal text content, equal image hashes, or equal data URLs
//!   when neither image has a hash (a hashed and an unhashed image may share
//!   a data URL)
//! - holds at most `maxCacheSize` unpinned entries beyond what pinned ones
//!   force, evicting the oldest unpinned entry first; pinned entries are
//!   never evicted
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Records, captures, ordering and eviction
//! - [`settings`]: Stored preferences (cache bound, theme, language)
//! - [`wire`]: Export/import document format
//! - [`tags`]: Tag validation
//! - [`image`]: Image hashing and data URLs
//! - [`config`]: Process configuration (data directory, log level)
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod image;
pub mod model;
pub mod settings;
pub mod store;
pub mod tags;
pub mod wire;
