//! Invariant sweep over many generator seeds.
//!
//! For each seed, generates a dataset and checks every selection
//! combination against the dashboard invariants. Prints a JSON summary and
//! exits non-zero if anything was violated.
//!
//! Usage: SEED=0 SEEDS=1000 cargo run --release --bin seed_sweep

use std::collections::BTreeMap;
use std::env;

use anyhow::Result;
use chrono::Duration;
use serde_json::json;

use fitdash::config::Config;
use fitdash::generator::{generate_seeded, DAYS, SEEDED_ANOMALIES};
use fitdash::logging::{log, obj, v_num, Domain, Level};
use fitdash::model::{Dataset, Metric, TimeRange};
use fitdash::view::{compute_stats, filter_range};

fn check(dataset: &Dataset, cfg: &Config) -> Vec<String> {
    let mut violations = Vec::new();
    let recs = dataset.records();

    if recs.len() != DAYS {
        violations.push(format!("len={}", recs.len()));
    }
    if dataset.start_date() != Some(cfg.start_date) {
        violations.push("start_date".to_string());
    }
    for (i, pair) in recs.windows(2).enumerate() {
        if pair[1].date - pair[0].date != Duration::days(1) {
            violations.push(format!("gap_after={}", i));
        }
    }
    for &(idx, hr) in SEEDED_ANOMALIES.iter() {
        match recs.get(idx) {
            Some(r) if r.heart_rate == hr && r.is_anomaly => {}
            _ => violations.push(format!("override_missing={}", idx)),
        }
    }

    for range in [TimeRange::Last7, TimeRange::Last14] {
        let slice = filter_range(recs, range);
        if slice != &recs[recs.len().saturating_sub(range.days())..] {
            violations.push(format!("{}:slice", range));
        }
        for metric in [Metric::Steps, Metric::HeartRate] {
            let stats = compute_stats(slice, metric);
            if !(stats.min <= stats.avg && stats.avg <= stats.max) {
                violations.push(format!("{}/{}:ordering", range, metric));
            }
            let expected = match metric {
                Metric::Steps => 0,
                Metric::HeartRate => slice.iter().filter(|r| r.is_elevated()).count(),
            };
            if stats.anomalies != expected {
                violations.push(format!("{}/{}:anomalies", range, metric));
            }
        }
    }
    violations
}

fn main() -> Result<()> {
    let cfg = Config::from_env()?;
    let first = cfg.seed.unwrap_or(0);
    let seeds: u64 = env::var("SEEDS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000);

    let mut failures: Vec<serde_json::Value> = Vec::new();
    let mut elevated_hist: BTreeMap<usize, u64> = BTreeMap::new();

    for seed in first..first.saturating_add(seeds) {
        let dataset = generate_seeded(seed, &cfg.generator());
        let elevated = dataset.records().iter().filter(|r| r.is_elevated()).count();
        *elevated_hist.entry(elevated).or_insert(0) += 1;

        let violations = check(&dataset, &cfg);
        if !violations.is_empty() {
            failures.push(json!({ "seed": seed, "violations": violations }));
        }
    }

    log(
        Level::Info,
        Domain::Generator,
        "seed_sweep",
        obj(&[
            ("seeds", json!(seeds)),
            ("failures", json!(failures.len())),
            ("failure_rate", v_num(failures.len() as f64 / seeds.max(1) as f64)),
        ]),
    );

    let summary = json!({
        "first_seed": first,
        "seeds": seeds,
        "violations": failures,
        "elevated_days_histogram": elevated_hist,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
