//! Derived view model: slice the dataset by time range and aggregate the
//! selected metric. Nothing here is cached; every accessor recomputes from
//! the immutable dataset and the current selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metric_config::MetricConfig;
use crate::model::{DailyRecord, Dataset, Metric, Status, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub metric: Metric,
    pub range: TimeRange,
}

impl Default for Selection {
    fn default() -> Self {
        Self { metric: Metric::Steps, range: TimeRange::Last7 }
    }
}

impl Selection {
    pub fn new(metric: Metric, range: TimeRange) -> Self {
        Self { metric, range }
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.range = range;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Stats {
    pub avg: u32,
    pub max: u32,
    pub min: u32,
    /// Always 0 for steps.
    pub anomalies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub date: NaiveDate,
    pub day_of_week: String,
    pub steps: u32,
    pub heart_rate: u32,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u32,
    pub highlighted: bool,
}

/// Trailing `range.days()` records, or everything if the slice is shorter.
pub fn filter_range(records: &[DailyRecord], range: TimeRange) -> &[DailyRecord] {
    let start = records.len().saturating_sub(range.days());
    &records[start..]
}

pub fn classify(record: &DailyRecord) -> Status {
    if record.is_elevated() {
        Status::Elevated
    } else {
        Status::Normal
    }
}

/// Aggregates over `records`. An empty slice yields all zeroes.
pub fn compute_stats(records: &[DailyRecord], metric: Metric) -> Stats {
    if records.is_empty() {
        return Stats::default();
    }

    let values: Vec<u32> = records.iter().map(|r| r.value(metric)).collect();
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    let max = values.iter().copied().max().unwrap_or(0);
    let min = values.iter().copied().min().unwrap_or(0);

    let anomalies = match metric {
        Metric::HeartRate => records.iter().filter(|r| r.is_elevated()).count(),
        Metric::Steps => 0,
    };

    Stats {
        avg: round_half_up(sum, values.len() as u64),
        max,
        min,
        anomalies,
    }
}

/// Integer mean with .5 rounded upward.
fn round_half_up(sum: u64, n: u64) -> u32 {
    if n == 0 {
        return 0;
    }
    ((2 * sum + n) / (2 * n)) as u32
}

pub struct DashboardView<'a> {
    dataset: &'a Dataset,
    selection: Selection,
}

impl<'a> DashboardView<'a> {
    pub fn new(dataset: &'a Dataset, selection: Selection) -> Self {
        Self { dataset, selection }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.selection.set_metric(metric);
    }

    pub fn set_range(&mut self, range: TimeRange) {
        self.selection.set_range(range);
    }

    pub fn config(&self) -> &'static MetricConfig {
        MetricConfig::for_metric(self.selection.metric)
    }

    pub fn filtered(&self) -> &'a [DailyRecord] {
        filter_range(self.dataset.records(), self.selection.range)
    }

    pub fn stats(&self) -> Stats {
        compute_stats(self.filtered(), self.selection.metric)
    }

    /// Status is independent of the selected metric.
    pub fn rows(&self) -> Vec<TableRow> {
        self.filtered()
            .iter()
            .map(|r| TableRow {
                date: r.date,
                day_of_week: r.day_of_week.clone(),
                steps: r.steps,
                heart_rate: r.heart_rate,
                status: classify(r),
            })
            .collect()
    }

    pub fn chart(&self) -> Vec<ChartPoint> {
        let metric = self.selection.metric;
        self.filtered()
            .iter()
            .map(|r| ChartPoint {
                label: r.day_of_week.clone(),
                value: r.value(metric),
                highlighted: metric == Metric::HeartRate && r.is_elevated(),
            })
            .collect()
    }

    pub fn anomaly_card(&self) -> String {
        match self.selection.metric {
            Metric::HeartRate => self.stats().anomalies.to_string(),
            Metric::Steps => "—".to_string(),
        }
    }

    pub fn alert(&self) -> Option<String> {
        if self.selection.metric != Metric::HeartRate {
            return None;
        }
        let n = self.stats().anomalies;
        if n == 0 {
            return None;
        }
        Some(format!(
            "{} day{} with heart rate above {} bpm (marked with *). \
             Consider consulting a healthcare provider if this persists.",
            n,
            if n > 1 { "s" } else { "" },
            self.config().anomaly_threshold
        ))
    }
}
