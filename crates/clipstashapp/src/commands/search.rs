use crate::error::Result;
use crate::model::CacheRecord;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// All records in canonical order.
pub fn all<B: StorageBackend>(store: &RecordStore<B>) -> Result<Vec<CacheRecord>> {
    store.load_records()
}

/// A single record by id.
pub fn get<B: StorageBackend>(store: &RecordStore<B>, id: &str) -> Result<Option<CacheRecord>> {
    Ok(store.load_records()?.into_iter().find(|r| r.id == id))
}

/// Records whose content, or any tag, contains `query` case-insensitively.
///
/// The query is trimmed first; a blank query returns everything. Canonical
/// order is preserved.
pub fn run<B: StorageBackend>(store: &RecordStore<B>, query: &str) -> Result<Vec<CacheRecord>> {
    let records = store.load_records()?;
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(records);
    }
    Ok(records
        .into_iter()
        .filter(|r| r.matches_query(&needle))
        .collect())
}
