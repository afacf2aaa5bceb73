use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use std::collections::BTreeSet;

/// Replace the full tag list of `id`.
///
/// The list is stored as given: deduplication and length checks are the
/// caller's job (see [`crate::tags::normalize_tags`]). Returns `false` if
/// `id` is unknown.
pub fn update_tags<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &str,
    tags: Vec<String>,
) -> Result<bool> {
    let mut records = store.load_records()?;
    let Some(record) = records.iter_mut().find(|r| r.id == id) else {
        tracing::debug!(id, "update tags: no such record");
        return Ok(false);
    };
    record.tags = tags;
    store.save_records(&records)?;
    Ok(true)
}

/// Every tag in use, deduplicated and sorted lexicographically.
pub fn all_tags<B: StorageBackend>(store: &RecordStore<B>) -> Result<Vec<String>> {
    let records = store.load_records()?;
    let tags: BTreeSet<String> = records
        .into_iter()
        .flat_map(|r| r.tags.into_iter())
        .collect();
    Ok(tags.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::capture;
    use crate::model::Capture;
    use crate::store::mem_backend::MemBackend;

    fn store_with(texts: &[&str]) -> RecordStore<MemBackend> {
        let mut store = RecordStore::with_backend(MemBackend::new());
        for text in texts {
            capture::run(&mut store, Capture::text(*text)).unwrap();
        }
        store
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn update_replaces_tags() {
        let mut store = store_with(&["a"]);
        let id = store.load_records().unwrap()[0].id.clone();

        assert!(update_tags(&mut store, &id, tags(&["x", "y"])).unwrap());
        assert!(update_tags(&mut store, &id, tags(&["z"])).unwrap());
        assert_eq!(store.load_records().unwrap()[0].tags, vec!["z"]);
    }

    #[test]
    fn update_missing_id_returns_false() {
        let mut store = store_with(&["a"]);
        assert!(!update_tags(&mut store, "nope", tags(&["x"])).unwrap());
    }

    #[test]
    fn update_keeps_order() {
        let mut store = store_with(&["a", "b"]);
        let before: Vec<String> = store.load_records().unwrap().into_iter().map(|r| r.id).collect();
        update_tags(&mut store, &before[1], tags(&["t"])).unwrap();
        let after: Vec<String> = store.load_records().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn all_tags_sorted_and_unique() {
        let mut store = store_with(&["a", "b"]);
        let ids: Vec<String> = store.load_records().unwrap().into_iter().map(|r| r.id).collect();
        update_tags(&mut store, &ids[0], tags(&["work", "Alpha"])).unwrap();
        update_tags(&mut store, &ids[1], tags(&["work", "beta"])).unwrap();

        assert_eq!(all_tags(&store).unwrap(), vec!["Alpha", "beta", "work"]);
    }

    #[test]
    fn all_tags_empty_store() {
        let store = store_with(&[]);
        assert!(all_tags(&store).unwrap().is_empty());
    }
}
