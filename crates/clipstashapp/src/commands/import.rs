use super::ImportSummary;
use crate::error::Result;
use crate::model::{evict_to, sort_records};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use crate::wire;
use chrono::Utc;

/// Merge an export document (or a bare record list) into the store.
///
/// Each record is checked against the store and against records accepted
/// earlier in the same document. The merged list is sorted and evicted down
/// to the bound in memory, then written once; a malformed document fails
/// before anything is written.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, document: &str) -> Result<ImportSummary> {
    let raw_records = wire::parse_document(document)?;
    let mut records = store.load_records()?;
    let settings = store.load_settings()?;
    let now = Utc::now();

    let mut summary = ImportSummary {
        total: raw_records.len(),
        ..Default::default()
    };

    for raw in &raw_records {
        let Some(record) = wire::from_external(raw, &records, now) else {
            continue;
        };
        if records.iter().any(|r| r.is_duplicate_of(&record.probe())) {
            summary.duplicates += 1;
            continue;
        }
        records.push(record);
        summary.added += 1;
    }

    sort_records(&mut records);
    let evicted = evict_to(&mut records, settings.max_cache_size);
    store.save_records(&records)?;

    tracing::info!(
        total = summary.total,
        added = summary.added,
        duplicates = summary.duplicates,
        evicted = evicted.len(),
        "import finished"
    );
    Ok(summary)
}
