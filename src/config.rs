use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::generator::{default_start_date, GeneratorConfig};
use crate::model::{Metric, TimeRange};
use crate::view::Selection;

#[derive(Debug, Clone)]
pub struct Config {
    /// `None` means seed from OS entropy.
    pub seed: Option<u64>,
    pub start_date: NaiveDate,
    pub metric: Metric,
    pub range: TimeRange,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            start_date: default_start_date(),
            metric: Metric::Steps,
            range: TimeRange::Last7,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process env.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let start_date = match get("START_DATE") {
            Some(v) => NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .with_context(|| format!("invalid START_DATE {:?}", v))?,
            None => defaults.start_date,
        };
        let metric = match get("METRIC") {
            Some(v) => v.parse().context("invalid METRIC")?,
            None => defaults.metric,
        };
        let range = match get("RANGE") {
            Some(v) => v.parse().context("invalid RANGE")?,
            None => defaults.range,
        };
        let seed = match get("SEED") {
            Some(v) => Some(
                v.trim()
                    .parse()
                    .with_context(|| format!("invalid SEED {:?}", v))?,
            ),
            None => None,
        };
        Ok(Self {
            seed,
            start_date,
            metric,
            range,
        })
    }

    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig { start_date: self.start_date }
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.metric, self.range)
    }
}
