use super::StorageStats;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::record_store::serialize_records;
use crate::store::RecordStore;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Count, bound and the serialized size of the whole record blob.
pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<StorageStats> {
    let records = store.load_records()?;
    let settings = store.load_settings()?;
    let total_bytes = serialize_records(&records)?.len() as u64;

    Ok(StorageStats {
        count: records.len(),
        max_count: settings.max_cache_size,
        total_bytes,
        formatted_size: format_bytes(total_bytes),
    })
}

/// `512 B`, `1.5 KB`, `2.25 MB`. Units step by 1024.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    }
}
