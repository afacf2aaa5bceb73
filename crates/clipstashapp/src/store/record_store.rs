use super::backend::StorageBackend;
use super::{LANG_KEY, RECORDS_KEY, SETTINGS_KEY, THEME_KEY};
use crate::error::{ClipError, Result};
use crate::model::CacheRecord;
use crate::settings::{Language, Settings, SettingsPatch, Theme};
use serde_json::{Map, Value};

/// The explicit store object: one per process, built over an injected backend.
///
/// Reads take `&self`; every write takes `&mut self`, so within a process
/// the borrow checker is what serializes mutations.
pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    // --- Records ---

    /// Load the record list in its persisted (canonical) order.
    /// A missing blob is an empty store; a corrupt one is an error.
    pub fn load_records(&self) -> Result<Vec<CacheRecord>> {
        match self.backend.get(RECORDS_KEY)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(ClipError::Serialization),
        }
    }

    /// Persist the full record list as one blob. Callers pass it already sorted.
    pub fn save_records(&mut self, records: &[CacheRecord]) -> Result<()> {
        let raw = serialize_records(records)?;
        self.backend.set(RECORDS_KEY, &raw)
    }

    // --- Settings ---

    pub fn load_settings(&self) -> Result<Settings> {
        match self.backend.get(SETTINGS_KEY)? {
            None => Ok(Settings::default()),
            Some(raw) => serde_json::from_str(&raw).map_err(ClipError::Serialization),
        }
    }

    /// Merge `patch` into the stored settings object and return the result.
    /// Keys unknown to this version are kept as they are.
    pub fn save_settings(&mut self, patch: &SettingsPatch) -> Result<Settings> {
        let mut merged: Map<String, Value> = match self.backend.get(SETTINGS_KEY)? {
            None => Map::new(),
            Some(raw) => serde_json::from_str(&raw).map_err(ClipError::Serialization)?,
        };
        if let Value::Object(fields) = serde_json::to_value(patch)? {
            merged.extend(fields);
        }
        let settings: Settings = serde_json::from_value(Value::Object(merged.clone()))?;
        let raw = serde_json::to_string(&merged)?;
        self.backend.set(SETTINGS_KEY, &raw)?;
        Ok(settings)
    }

    // --- Theme & Language ---

    pub fn load_theme(&self) -> Result<Theme> {
        Ok(match self.backend.get(THEME_KEY)? {
            None => Theme::default(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "unreadable theme preference, using default");
                Theme::default()
            }),
        })
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<()> {
        let raw = serde_json::to_string(&theme)?;
        self.backend.set(THEME_KEY, &raw)
    }

    pub fn load_language(&self) -> Result<Language> {
        Ok(match self.backend.get(LANG_KEY)? {
            None => Language::default(),
            Some(raw) => match serde_json::from_str::<String>(&raw) {
                Ok(code) => Language::from_stored(&code),
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable language preference, using default");
                    Language::default()
                }
            },
        })
    }

    pub fn save_language(&mut self, language: Language) -> Result<()> {
        let raw = serde_json::to_string(language.as_str())?;
        self.backend.set(LANG_KEY, &raw)
    }
}

/// The exact text persisted for a record list. Storage stats measure this.
pub fn serialize_records(records: &[CacheRecord]) -> Result<String> {
    serde_json::to_string(records).map_err(ClipError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Capture;
    use crate::store::mem_backend::MemBackend;
    use chrono::Utc;

    fn make_store() -> RecordStore<MemBackend> {
        RecordStore::with_backend(MemBackend::new())
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let store = make_store();
        assert!(store.load_records().unwrap().is_empty());
        assert_eq!(store.load_settings().unwrap(), Settings::default());
        assert_eq!(store.load_theme().unwrap(), Theme::System);
        assert_eq!(store.load_language().unwrap(), Language::En);
    }

    #[test]
    fn test_records_round_trip_through_backend() {
        let mut store = make_store();
        let rec = Capture::text("hi").into_record("1_aaaaaaaa".into(), Utc::now());
        store.save_records(std::slice::from_ref(&rec)).unwrap();

        let loaded = store.load_records().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "hi");
        assert_eq!(loaded[0].id, "1_aaaaaaaa");
    }

    #[test]
    fn test_corrupt_record_blob_is_an_error() {
        let store = make_store();
        store.backend.set(RECORDS_KEY, "{not json").unwrap();
        assert!(matches!(
            store.load_records(),
            Err(ClipError::Serialization(_))
        ));
    }

    #[test]
    fn test_settings_are_merged_not_replaced() {
        let mut store = make_store();
        store
            .backend
            .set(SETTINGS_KEY, r#"{"maxCacheSize":50,"futureFlag":true}"#)
            .unwrap();

        let saved = store
            .save_settings(&SettingsPatch::max_cache_size(200))
            .unwrap();
        assert_eq!(saved.max_cache_size, 200);

        let raw = store.backend.get(SETTINGS_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["maxCacheSize"], 200);
        assert_eq!(value["futureFlag"], true);
    }

    #[test]
    fn test_empty_patch_keeps_settings() {
        let mut store = make_store();
        store
            .save_settings(&SettingsPatch::max_cache_size(30))
            .unwrap();
        let saved = store.save_settings(&SettingsPatch::default()).unwrap();
        assert_eq!(saved.max_cache_size, 30);
    }

    #[test]
    fn test_theme_and_language_persist() {
        let mut store = make_store();
        store.save_theme(Theme::Dark).unwrap();
        store.save_language(Language::Zh).unwrap();
        assert_eq!(store.load_theme().unwrap(), Theme::Dark);
        assert_eq!(store.load_language().unwrap(), Language::Zh);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back() {
        let store = make_store();
        store.backend.set(THEME_KEY, r#""sepia""#).unwrap();
        assert_eq!(store.load_theme().unwrap(), Theme::System);
    }

    #[test]
    fn test_save_fails_on_write_error() {
        let mut store = make_store();
        store.backend.set_simulate_write_error(true);
        assert!(store.save_records(&[]).is_err());
    }
}
