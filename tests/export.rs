use std::fs;

use fitdash::export::{read_dataset, sha256_hex, write_dataset, DATASET_FILE, MANIFEST_FILE};
use fitdash::generator::{generate_seeded, GeneratorConfig};
use tempfile::TempDir;

#[test]
fn export_writes_dataset_and_manifest() {
    let dir = TempDir::new().unwrap();
    let ds = generate_seeded(17, &GeneratorConfig::default());
    let manifest = write_dataset(dir.path(), &ds, Some(17)).unwrap();

    assert_eq!(manifest.record_count, 14);
    assert_eq!(manifest.seed, Some(17));
    assert_eq!(manifest.start_date, ds.start_date());
    assert_eq!(manifest.end_date, ds.end_date());
    assert_eq!(manifest.seeded_overrides, vec![(5, 105), (10, 110)]);

    let body = fs::read(dir.path().join(DATASET_FILE)).unwrap();
    assert_eq!(sha256_hex(&body), manifest.sha256);
    assert!(dir.path().join(MANIFEST_FILE).exists());
}

#[test]
fn exported_dataset_reads_back_identically() {
    let dir = TempDir::new().unwrap();
    let ds = generate_seeded(3, &GeneratorConfig::default());
    write_dataset(dir.path(), &ds, Some(3)).unwrap();
    let (back, manifest) = read_dataset(dir.path()).unwrap();
    assert_eq!(back, ds);
    assert_eq!(manifest.record_count, 14);
}

#[test]
fn tampered_dataset_is_rejected() {
    let dir = TempDir::new().unwrap();
    let ds = generate_seeded(3, &GeneratorConfig::default());
    write_dataset(dir.path(), &ds, None).unwrap();
    let path = dir.path().join(DATASET_FILE);
    let body = fs::read_to_string(&path).unwrap().replacen("110", "90", 1);
    fs::write(&path, body).unwrap();
    let err = read_dataset(dir.path()).unwrap_err();
    assert!(err.to_string().contains("hash mismatch"));
}

#[test]
fn manifest_count_must_match_records() {
    let dir = TempDir::new().unwrap();
    let ds = generate_seeded(8, &GeneratorConfig::default());
    write_dataset(dir.path(), &ds, Some(8)).unwrap();
    let path = dir.path().join(MANIFEST_FILE);
    let body = fs::read_to_string(&path)
        .unwrap()
        .replacen("\"record_count\": 14", "\"record_count\": 13", 1);
    fs::write(&path, body).unwrap();
    let err = read_dataset(dir.path()).unwrap_err();
    assert!(err.to_string().contains("record count mismatch"));
}
