//! Outlier detection for unusual consumption readings
//!
//! Uses Z-score based statistical analysis to flag readings that deviate
//! significantly from the series mean.

use serde::{Deserialize, Serialize};

use super::{ratio_or_zero, round_to};
use crate::config::Thresholds;
use crate::models::Reading;

/// Minimum readings for a meaningful standard deviation
const MIN_READINGS: usize = 3;

/// Severity level for outliers based on standard deviations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierSeverity {
    /// Above the critical threshold (default: >3 standard deviations)
    High,
    /// Above the outlier threshold (default: >2 standard deviations)
    Medium,
}

impl OutlierSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

/// Flagged reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Consumption value (2 decimals)
    pub consumption: f64,
    /// Percent difference from the mean (1 decimal)
    pub deviation: f64,
    pub severity: OutlierSeverity,
}

/// Statistical summary for outlier detection
#[derive(Debug, Clone)]
struct Statistics {
    mean: f64,
    std_dev: f64,
}

impl Statistics {
    /// Population mean and standard deviation (divide by n)
    fn compute(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Absolute Z-score; callers must rule out a zero deviation first
    fn abs_z_score(&self, value: f64) -> f64 {
        ((value - self.mean) / self.std_dev).abs()
    }

    /// Deviation percentage from mean, 0 when the mean is 0
    fn deviation_pct(&self, value: f64) -> f64 {
        ratio_or_zero(value - self.mean, self.mean) * 100.0
    }
}

/// Detect outliers with default thresholds
pub fn detect_outliers(readings: &[Reading]) -> Vec<Outlier> {
    detect_outliers_with(readings, &Thresholds::default())
}

/// Detect outliers in a consumption series
///
/// # Algorithm
/// - Calculate mean (μ) and population standard deviation (σ)
/// - |z| = |x - μ| / σ
/// - Flag if |z| > `outlier_z` (medium) or |z| > `critical_z` (high)
///
/// # Returns
/// Outliers in input order. Empty when fewer than 3 readings exist or
/// when every reading has the same value.
pub fn detect_outliers_with(readings: &[Reading], thresholds: &Thresholds) -> Vec<Outlier> {
    if readings.len() < MIN_READINGS {
        return vec![];
    }

    let values: Vec<f64> = readings.iter().map(|r| r.consumption).collect();
    let Some(stats) = Statistics::compute(&values) else {
        return vec![];
    };

    // No variation, nothing stands out
    if stats.std_dev == 0.0 {
        return vec![];
    }

    let outliers: Vec<Outlier> = readings
        .iter()
        .zip(&values)
        .filter_map(|(reading, &value)| {
            let abs_z = stats.abs_z_score(value);
            if abs_z <= thresholds.outlier_z {
                return None;
            }

            let severity = if abs_z > thresholds.critical_z {
                OutlierSeverity::High
            } else {
                OutlierSeverity::Medium
            };

            Some(Outlier {
                timestamp: reading.timestamp.clone(),
                consumption: round_to(value, 2),
                deviation: round_to(stats.deviation_pct(value), 1),
                severity,
            })
        })
        .collect();

    tracing::trace!(
        flagged = outliers.len(),
        mean = stats.mean,
        std_dev = stats.std_dev,
        "Outlier detection done"
    );

    outliers
}
