//! Descriptive statistics over a consumption series

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::models::Reading;

/// Aggregate statistics (2 decimals)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_consumption: f64,
    pub average_consumption: f64,
    pub min_consumption: f64,
    pub max_consumption: f64,
    pub data_points: usize,
    /// Population variance
    pub variance: f64,
}

/// Compute summary statistics. Empty input yields all zeros.
pub fn calculate_summary(readings: &[Reading]) -> Summary {
    if readings.is_empty() {
        return Summary::default();
    }

    let values: Vec<f64> = readings.iter().map(|r| r.consumption).collect();
    let count = values.len();
    let total: f64 = values.iter().sum();
    let average = total / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = values.iter().map(|v| (v - average).powi(2)).sum::<f64>() / count as f64;

    Summary {
        total_consumption: round_to(total, 2),
        average_consumption: round_to(average, 2),
        min_consumption: round_to(min, 2),
        max_consumption: round_to(max, 2),
        data_points: count,
        variance: round_to(variance, 2),
    }
}
