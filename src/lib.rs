//! Fitness dashboard core: mock wearable data, derived statistics and
//! heart-rate anomaly classification.

pub mod config;
pub mod export;
pub mod generator;
pub mod logging;
pub mod metric_config;
pub mod model;
pub mod render;
pub mod view;
