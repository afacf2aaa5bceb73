use crate::error::Result;
use crate::settings::{Language, Settings, SettingsPatch, Theme};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

pub fn settings<B: StorageBackend>(store: &RecordStore<B>) -> Result<Settings> {
    store.load_settings()
}

/// Merge `patch` into the stored settings.
///
/// A smaller bound does not evict by itself; the next capture or import
/// trims the store.
pub fn save_settings<B: StorageBackend>(
    store: &mut RecordStore<B>,
    patch: &SettingsPatch,
) -> Result<Settings> {
    let settings = store.save_settings(patch)?;
    tracing::info!(max_cache_size = settings.max_cache_size, "settings saved");
    Ok(settings)
}

pub fn theme<B: StorageBackend>(store: &RecordStore<B>) -> Result<Theme> {
    store.load_theme()
}

pub fn save_theme<B: StorageBackend>(store: &mut RecordStore<B>, theme: Theme) -> Result<()> {
    store.save_theme(theme)
}

pub fn language<B: StorageBackend>(store: &RecordStore<B>) -> Result<Language> {
    store.load_language()
}

pub fn save_language<B: StorageBackend>(
    store: &mut RecordStore<B>,
    language: Language,
) -> Result<()> {
    store.save_language(language)
}
