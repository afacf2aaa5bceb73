use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// Remove the record with `id`. Returns whether anything was removed;
/// an unknown id is a no-op and nothing is written.
pub fn remove<B: StorageBackend>(store: &mut RecordStore<B>, id: &str) -> Result<bool> {
    let mut records = store.load_records()?;
    let Some(idx) = records.iter().position(|r| r.id == id) else {
        tracing::debug!(id, "remove: no such record");
        return Ok(false);
    };
    records.remove(idx);
    store.save_records(&records)?;
    Ok(true)
}

/// Empty the store unconditionally.
pub fn clear<B: StorageBackend>(store: &mut RecordStore<B>) -> Result<()> {
    store.save_records(&[])?;
    tracing::info!("cleared all records");
    Ok(())
}
