//! Per-metric display settings: labels, units, colors and thresholds.

use serde::Serialize;

use crate::model::{Metric, HEART_RATE_ANOMALY_THRESHOLD};

/// Display settings for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricConfig {
    pub label: &'static str,
    pub unit: &'static str,
    pub color: &'static str,
    pub goal_threshold: u32,
    pub anomaly_threshold: u32,
}

const STEPS: MetricConfig = MetricConfig {
    label: "Steps",
    unit: "",
    color: "#3b82f6",
    goal_threshold: 10_000,
    anomaly_threshold: 3_000,
};

const HEART_RATE: MetricConfig = MetricConfig {
    label: "Heart Rate (bpm)",
    unit: " bpm",
    color: "#ef4444",
    goal_threshold: 100,
    anomaly_threshold: HEART_RATE_ANOMALY_THRESHOLD,
};

impl MetricConfig {
    pub fn for_metric(metric: Metric) -> &'static MetricConfig {
        match metric {
            Metric::Steps => &STEPS,
            Metric::HeartRate => &HEART_RATE,
        }
    }

    pub fn format_value(&self, value: u32) -> String {
        format!("{}{}", value, self.unit)
    }
}
