use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use crate::wire::ExportDocument;
use chrono::{DateTime, Utc};

/// Build the export document for the current store contents.
pub fn document<B: StorageBackend>(
    store: &RecordStore<B>,
    exported_at: DateTime<Utc>,
) -> Result<ExportDocument> {
    let records = store.load_records()?;
    Ok(ExportDocument::new(&records, exported_at))
}

/// Serialize the store as a pretty-printed export document.
pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<String> {
    let doc = document(store, Utc::now())?;
    tracing::info!(records = doc.records.len(), "exporting records");
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Default file name for an export taken at `now`.
pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("clipstash-export-{}.json", now.timestamp_millis())
}
