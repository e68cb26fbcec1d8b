//! Dataset export: JSON records plus a SHA-256 manifest, and verified read-back.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::generator::SEEDED_ANOMALIES;
use crate::logging::{log_export, ts_now};
use crate::model::{DailyRecord, Dataset};

pub const DATASET_FILE: &str = "dataset.json";
pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetManifest {
    pub record_count: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub seed: Option<u64>,
    pub sha256: String,
    pub seeded_overrides: Vec<(usize, u32)>,
    pub generated_at: String,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Writes `dataset.json` and `manifest.json` into `dir`, creating it if needed.
pub fn write_dataset(dir: &Path, dataset: &Dataset, seed: Option<u64>) -> Result<DatasetManifest> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let body = serde_json::to_vec_pretty(dataset.records())?;
    let dataset_path = dir.join(DATASET_FILE);
    fs::write(&dataset_path, &body)
        .with_context(|| format!("write {}", dataset_path.display()))?;

    let manifest = DatasetManifest {
        record_count: dataset.len(),
        start_date: dataset.start_date(),
        end_date: dataset.end_date(),
        seed,
        sha256: sha256_hex(&body),
        seeded_overrides: SEEDED_ANOMALIES.to_vec(),
        generated_at: ts_now(),
    };
    let manifest_path = dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest)?)
        .with_context(|| format!("write {}", manifest_path.display()))?;

    log_export(&dir.display().to_string(), &manifest.sha256, manifest.record_count);
    Ok(manifest)
}

/// Reads an exported dataset back and checks it against its manifest hash.
pub fn read_dataset(dir: &Path) -> Result<(Dataset, DatasetManifest)> {
    let body = fs::read(dir.join(DATASET_FILE))
        .with_context(|| format!("read {}", dir.join(DATASET_FILE).display()))?;
    let manifest: DatasetManifest = serde_json::from_slice(
        &fs::read(dir.join(MANIFEST_FILE))
            .with_context(|| format!("read {}", dir.join(MANIFEST_FILE).display()))?,
    )?;
    let actual = sha256_hex(&body);
    if actual != manifest.sha256 {
        anyhow::bail!("dataset hash mismatch: manifest {} actual {}", manifest.sha256, actual);
    }
    let records: Vec<DailyRecord> = serde_json::from_slice(&body)?;
    if records.len() != manifest.record_count {
        anyhow::bail!(
            "record count mismatch: manifest {} actual {}",
            manifest.record_count,
            records.len()
        );
    }
    Ok((Dataset::from_records(records), manifest))
}
