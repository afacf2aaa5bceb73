use crate::error::Result;
use crate::model::sort_records;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use chrono::Utc;

/// Flip the pin state of `id`, re-sort and persist.
///
/// Returns `Some(new_state)`, or `None` if no record has that id.
pub fn toggle_checked<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &str,
) -> Result<Option<bool>> {
    let mut records = store.load_records()?;
    let Some(record) = records.iter_mut().find(|r| r.id == id) else {
        tracing::debug!(id, "toggle pin: no such record");
        return Ok(None);
    };

    record.pinned = !record.pinned;
    record.pinned_at = if record.pinned { Some(Utc::now()) } else { None };
    let pinned = record.pinned;

    sort_records(&mut records);
    store.save_records(&records)?;
    Ok(Some(pinned))
}

/// Flip the pin state of `id` and return the new state.
///
/// An unknown id also returns `false`, indistinguishable from "now unpinned".
/// Use [`toggle_checked`] when the difference matters.
pub fn toggle<B: StorageBackend>(store: &mut RecordStore<B>, id: &str) -> Result<bool> {
    Ok(toggle_checked(store, id)?.unwrap_or(false))
}
