use super::AddOutcome;
use crate::error::Result;
use crate::model::{evict_to, fresh_id, sort_records, Capture};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use chrono::Utc;

/// Add a captured payload to the store.
///
/// 1. Blank dedup key → `blank`, nothing stored.
/// 2. Any existing record matching the duplicate rule → `duplicate`.
/// 3. Otherwise insert at the head, sort, evict oldest non-pinned records
///    down to `max_cache_size`, persist.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, capture: Capture) -> Result<AddOutcome> {
    if capture.dedup_key().is_none() {
        tracing::debug!(kind = %capture.kind(), "ignoring blank capture");
        return Ok(AddOutcome::blank());
    }

    let mut records = store.load_records()?;
    let probe = capture.probe();
    if records.iter().any(|r| r.is_duplicate_of(&probe)) {
        tracing::debug!(kind = %capture.kind(), "capture is a duplicate");
        return Ok(AddOutcome::duplicate());
    }

    let settings = store.load_settings()?;
    let now = Utc::now();
    let record = capture.into_record(fresh_id(&records, now), now);
    tracing::debug!(id = %record.id, kind = %record.kind, "adding record");
    records.insert(0, record);

    sort_records(&mut records);
    for gone in evict_to(&mut records, settings.max_cache_size) {
        tracing::debug!(id = %gone.id, "evicted record");
    }

    store.save_records(&records)?;
    Ok(AddOutcome::added())
}
