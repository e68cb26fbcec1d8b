//! Core data types: daily wearable records and the two selection enums.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Heart rate (bpm) above which a flagged reading counts as elevated.
pub const HEART_RATE_ANOMALY_THRESHOLD: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub steps: u32,
    pub heart_rate: u32,
    pub is_anomaly: bool,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, steps: u32, heart_rate: u32, is_anomaly: bool) -> Self {
        Self {
            date,
            day_of_week: date.format("%a").to_string(),
            steps,
            heart_rate,
            is_anomaly,
        }
    }

    pub fn value(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Steps => self.steps,
            Metric::HeartRate => self.heart_rate,
        }
    }

    /// Both the generation-time flag and the threshold must hold.
    pub fn is_elevated(&self) -> bool {
        self.is_anomaly && self.heart_rate > HEART_RATE_ANOMALY_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Steps,
    HeartRate,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Steps => "steps",
            Metric::HeartRate => "heart_rate",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "steps" => Ok(Metric::Steps),
            "heart-rate" | "heart_rate" | "heartRate" | "hr" => Ok(Metric::HeartRate),
            other => bail!("unknown metric: {:?} (expected steps or heart-rate)", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    Last7,
    Last14,
}

impl TimeRange {
    pub fn days(&self) -> usize {
        match self {
            TimeRange::Last7 => 7,
            TimeRange::Last14 => 14,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Last7 => "Last 7 Days",
            TimeRange::Last14 => "Last 14 Days",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Last7 => "last7",
            TimeRange::Last14 => "last14",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "7" | "last7" | "week" => Ok(TimeRange::Last7),
            "14" | "last14" | "two-weeks" | "twoWeeks" => Ok(TimeRange::Last14),
            other => bail!("unknown time range: {:?} (expected 7 or 14)", other),
        }
    }
}

/// Table status for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Normal,
    Elevated,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "Normal",
            Status::Elevated => "Elevated",
        }
    }
}

/// The generated sequence. Built once; there is no mutation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    records: Vec<DailyRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<DailyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn day_of_week_is_short_english_label() {
        let r = DailyRecord::new(date("2024-11-15"), 7000, 70, false);
        assert_eq!(r.day_of_week, "Fri");
        let r = DailyRecord::new(date("2024-11-18"), 7000, 70, false);
        assert_eq!(r.day_of_week, "Mon");
    }

    #[test]
    fn elevated_requires_flag_and_threshold() {
        let d = date("2024-11-15");
        assert!(DailyRecord::new(d, 0, 101, true).is_elevated());
        assert!(!DailyRecord::new(d, 0, 100, true).is_elevated());
        assert!(!DailyRecord::new(d, 0, 120, false).is_elevated());
        assert!(!DailyRecord::new(d, 0, 70, true).is_elevated());
    }

    #[test]
    fn parses_selection_aliases() {
        assert_eq!("steps".parse::<Metric>().unwrap(), Metric::Steps);
        assert_eq!("heartRate".parse::<Metric>().unwrap(), Metric::HeartRate);
        assert_eq!("hr".parse::<Metric>().unwrap(), Metric::HeartRate);
        assert_eq!("week".parse::<TimeRange>().unwrap(), TimeRange::Last7);
        assert_eq!("14".parse::<TimeRange>().unwrap(), TimeRange::Last14);
        assert!("calories".parse::<Metric>().is_err());
        assert!("30".parse::<TimeRange>().is_err());
    }

    #[test]
    fn record_serializes_iso_date() {
        let r = DailyRecord::new(date("2024-11-15"), 8000, 72, false);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["date"], "2024-11-15");
        assert_eq!(v["day_of_week"], "Fri");
        assert_eq!(v["heart_rate"], 72);
    }
}
