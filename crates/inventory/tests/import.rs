//! File-backed inventory import and caching.

use std::fs;

use fleet_sim_inventory::{
    FileSource, InventoryCache, InventoryConfig, InventoryError, MAX_IMPORT_BYTES, RetryConfig,
    import_inventory_file,
};

const FLEET_JSON: &str = r#"[
    {"name": "Forklift A", "modelNumber": "M-1234", "manufacturingDate": "2023-01-15"},
    {"Name": "Forklift B", "model_number": "M-5678", "manufacturing_date": "2022-05-20"}
]"#;

const FLEET_CSV: &str = "Name,model_number,manufacturingDate\n\
Forklift A,M-1234,2023-01-15\n\
\n\
Forklift B,M-5678,2022-05-20\n";

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp inventory");
    (dir, path)
}

#[test]
fn imports_json_file_with_mixed_spellings() {
    let (_dir, path) = write_temp("fleet.json", FLEET_JSON);
    let inv = import_inventory_file(&path).unwrap();
    assert_eq!(inv.len(), 2);
    assert_eq!(inv[1].name, "Forklift B");
    assert_eq!(inv[1].model_number, "M-5678");
}

#[test]
fn imports_csv_file_skipping_blank_lines() {
    let (_dir, path) = write_temp("fleet.CSV", FLEET_CSV);
    let inv = import_inventory_file(&path).unwrap();
    assert_eq!(inv.len(), 2);
    assert_eq!(inv[0].name, "Forklift A");
    assert_eq!(inv[1].model_number, "M-5678");
    assert_eq!(inv[1].manufacturing_date, "2022-05-20");
}

#[test]
fn csv_and_json_imports_agree() {
    let (_d1, json) = write_temp("fleet.json", FLEET_JSON);
    let (_d2, csv) = write_temp("fleet.csv", FLEET_CSV);
    assert_eq!(
        import_inventory_file(&json).unwrap(),
        import_inventory_file(&csv).unwrap()
    );
}

#[test]
fn csv_error_names_data_row() {
    let body = "name,modelNumber,manufacturingDate\nA,M-1,2020-01-01\n\n,M-2,2021-01-01\n";
    let (_dir, path) = write_temp("fleet.csv", body);
    let err = import_inventory_file(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Item at index 2 must have name, modelNumber, and manufacturingDate as non-empty strings."
    );
}

#[test]
fn rejects_other_extensions() {
    let (_dir, path) = write_temp("fleet.txt", FLEET_CSV);
    let err = import_inventory_file(&path).unwrap_err();
    assert!(matches!(
        err,
        InventoryError::UnsupportedFormat { ref extension } if extension == "txt"
    ));
}

#[test]
fn rejects_oversized_file() {
    let big = " ".repeat(MAX_IMPORT_BYTES as usize + 1);
    let (_dir, path) = write_temp("fleet.json", &big);
    let err = import_inventory_file(&path).unwrap_err();
    assert!(matches!(err, InventoryError::FileTooLarge { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = import_inventory_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, InventoryError::Io { .. }));
    assert!(err.is_retryable());
}

#[test]
fn file_source_feeds_cache() {
    let (_dir, path) = write_temp("fleet.json", FLEET_JSON);
    let config = InventoryConfig::default().with_retry(RetryConfig::immediate(1));
    let mut cache = InventoryCache::new(FileSource::new(&path), config);
    let models: Vec<_> = cache
        .get()
        .unwrap()
        .iter()
        .map(|e| e.model_number.clone())
        .collect();
    assert_eq!(models, ["M-1234", "M-5678"]);
}

#[test]
fn cache_serves_snapshot_after_file_changes() {
    let (_dir, path) = write_temp("fleet.json", FLEET_JSON);
    let mut cache = InventoryCache::new(FileSource::new(&path), InventoryConfig::default());
    assert_eq!(cache.get().unwrap().len(), 2);

    fs::write(&path, "[]").unwrap();
    // Still within the freshness window: the old snapshot is served.
    assert_eq!(cache.get().unwrap().len(), 2);

    cache.invalidate();
    assert!(cache.get().unwrap().is_empty());
}
