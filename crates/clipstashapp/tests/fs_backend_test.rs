use clipstashapp::api::{ClipStashApi, PinState};
use clipstashapp::model::Capture;
use clipstashapp::store::backend::StorageBackend;
use clipstashapp::store::fs_backend::FsBackend;
use clipstashapp::store::{RECORDS_KEY, SETTINGS_KEY};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    backend.set("some-key", "Hello World").unwrap();
    assert_eq!(backend.get("some-key").unwrap(), Some("Hello World".to_string()));

    backend.remove("some-key").unwrap();
    assert_eq!(backend.get("some-key").unwrap(), None);

    // Removing twice is fine
    backend.remove("some-key").unwrap();
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();

    backend.set(RECORDS_KEY, "[]").unwrap();
    backend.set(RECORDS_KEY, "[ ]").unwrap();

    let expected_path = dir.path().join("clipstash-caches.json");
    assert!(expected_path.exists());
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), "[ ]");

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone());

    assert_eq!(backend.get(SETTINGS_KEY).unwrap(), None);
    backend.set(SETTINGS_KEY, "{}").unwrap();
    assert!(nested.join("clipstash-settings.json").exists());
}

#[test]
fn test_store_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut api = ClipStashApi::open(dir.path());
        api.add_cache(Capture::text("first")).unwrap();
        api.add_cache(Capture::html("second", "<b>second</b>")).unwrap();
        let id = api.search_caches("first").unwrap()[0].id.clone();
        assert_eq!(api.toggle_pin(&id).unwrap(), PinState::Pinned);
        api.update_cache_tags(&id, ["keep"]).unwrap();
        api.set_max_cache_size(25).unwrap();
    }

    let api = ClipStashApi::open(dir.path());
    let records = api.get_caches().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].content, "first");
    assert!(records[0].pinned);
    assert_eq!(records[0].tags, vec!["keep"]);
    assert_eq!(records[1].html_content.as_deref(), Some("<b>second</b>"));
    assert_eq!(api.settings().unwrap().max_cache_size, 25);
}

#[test]
fn test_corrupt_records_file_is_an_error() {
    let (dir, backend) = setup();
    backend.set(RECORDS_KEY, "{not json").unwrap();

    let api = ClipStashApi::open(dir.path());
    assert!(api.get_caches().is_err());
}

#[test]
fn test_export_from_disk_imports_elsewhere() {
    let source_dir = TempDir::new().unwrap();
    let target_dir = TempDir::new().unwrap();

    let mut source = ClipStashApi::open(source_dir.path());
    source.add_cache(Capture::text("alpha")).unwrap();
    source.add_cache(Capture::text("beta")).unwrap();
    let document = source.export_caches().unwrap();

    let mut target = ClipStashApi::open(target_dir.path());
    target.add_cache(Capture::text("alpha")).unwrap();
    let summary = target.import_caches(&document).unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.added, 1);
    assert_eq!(summary.duplicates, 1);

    let reopened = ClipStashApi::open(target_dir.path());
    assert_eq!(reopened.get_caches().unwrap().len(), 2);
}
