//! Plain-text dashboard: stat cards, a bar chart and the daily table.

use std::fmt::Write;

use crate::view::DashboardView;

const BAR_WIDTH: usize = 40;

pub fn dashboard(view: &DashboardView<'_>) -> String {
    let mut out = String::new();
    let sel = view.selection();
    let cfg = view.config();
    let stats = view.stats();

    let _ = writeln!(out, "Fitness Tracker");
    let _ = writeln!(out, "Monitor your daily activity and health metrics");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Metric: {}    Range: {}    Goal: {}    Color: {}",
        cfg.label,
        sel.range.label(),
        cfg.format_value(cfg.goal_threshold),
        cfg.color
    );
    let _ = writeln!(out);

    let cards = [
        ("Average", stats.avg.to_string()),
        ("Maximum", stats.max.to_string()),
        ("Minimum", stats.min.to_string()),
        ("Anomalies", view.anomaly_card()),
    ];
    for (name, value) in cards.iter() {
        let _ = writeln!(out, "  {:<10} {:>8}", name, value);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{} Trend", cfg.label);
    let _ = write!(out, "{}", chart(view));
    if let Some(alert) = view.alert() {
        let _ = writeln!(out);
        let _ = writeln!(out, "! Anomaly Detected: {}", alert);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Daily Breakdown");
    let _ = write!(out, "{}", table(view));
    out
}

/// One line per day; bars scale to the slice maximum.
pub fn chart(view: &DashboardView<'_>) -> String {
    let points = view.chart();
    let cfg = view.config();
    let peak = points.iter().map(|p| p.value).max().unwrap_or(0);
    let mut out = String::new();
    for p in &points {
        let len = if peak == 0 {
            0
        } else {
            (p.value as usize * BAR_WIDTH + peak as usize / 2) / peak as usize
        };
        let _ = writeln!(
            out,
            "  {:<4}|{:<width$}| {}{}",
            p.label,
            "#".repeat(len),
            cfg.format_value(p.value),
            if p.highlighted { " *" } else { "" },
            width = BAR_WIDTH
        );
    }
    out
}

pub fn table(view: &DashboardView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<10}  {:<3}  {:>6}  {:>10}  {}",
        "Date", "Day", "Steps", "Heart Rate", "Status"
    );
    for row in view.rows() {
        let _ = writeln!(
            out,
            "  {:<10}  {:<3}  {:>6}  {:>10}  {}",
            row.date.format("%Y-%m-%d"),
            row.day_of_week,
            row.steps,
            format!("{} bpm", row.heart_rate),
            row.status.as_str()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_seeded, GeneratorConfig};
    use crate::model::{Metric, TimeRange};
    use crate::view::Selection;

    #[test]
    fn steps_dashboard_shows_placeholder_and_no_alert() {
        let ds = generate_seeded(5, &GeneratorConfig::default());
        let view = DashboardView::new(&ds, Selection::default());
        let text = dashboard(&view);
        assert!(text.contains("Metric: Steps"));
        assert!(text.contains("Goal: 10000"));
        assert!(text.contains("Color: #3b82f6"));
        assert!(text.contains("Last 7 Days"));
        assert!(text.contains("—"));
        assert!(!text.contains("Anomaly Detected"));
        assert!(!text.contains(" *\n"));
    }

    #[test]
    fn heart_rate_dashboard_marks_elevated_days() {
        let ds = generate_seeded(5, &GeneratorConfig::default());
        let view = DashboardView::new(&ds, Selection::new(Metric::HeartRate, TimeRange::Last14));
        let text = dashboard(&view);
        assert!(text.contains("Anomaly Detected"));
        assert!(text.contains("110 bpm *"));
        assert!(text.contains("105 bpm *"));
        assert_eq!(table(&view).lines().count(), 15);
        assert!(table(&view).contains("Elevated"));
    }

    #[test]
    fn peak_day_fills_the_bar() {
        let ds = generate_seeded(5, &GeneratorConfig::default());
        let view = DashboardView::new(&ds, Selection::new(Metric::HeartRate, TimeRange::Last7));
        let full = "#".repeat(BAR_WIDTH);
        assert!(chart(&view).lines().any(|l| l.contains(&full)));
    }
}
