//! # Storage Layer
//!
//! The store persists four independent blobs through a key/value
//! [`backend::StorageBackend`]:
//!
//! ```text
//! clipstash-caches     # the full ordered record list, one JSON array
//! clipstash-settings   # {"maxCacheSize": N}
//! clipstash-theme      # "system" | "light" | "dark"
//! clipstash-lang       # "en" | "zh"
//! ```
//!
//! ## Read-Modify-Write
//!
//! Every operation loads the record blob, computes the new list in memory and
//! writes the blob back once. A call either writes its result or fails before
//! writing, so atomicity is per call. There is no cross-call transaction and
//! no coordination between processes sharing one data directory.
//!
//! ## Ordering Strategy
//!
//! The blob is kept in canonical order (pinned by pin time, then by creation
//! time) and fully re-sorted on insert, pin toggle and import. At the sizes
//! the bound allows (≤ 999 records) a sort per write is cheaper to reason
//! about than maintaining two indices.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per key, atomic writes.
//! - [`mem_backend::MemBackend`]: in-memory map for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── clipstash-caches.json
//! ├── clipstash-settings.json
//! ├── clipstash-theme.json
//! └── clipstash-lang.json
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod record_store;

pub use record_store::RecordStore;

pub const RECORDS_KEY: &str = "clipstash-caches";
pub const SETTINGS_KEY: &str = "clipstash-settings";
pub const THEME_KEY: &str = "clipstash-theme";
pub const LANG_KEY: &str = "clipstash-lang";
