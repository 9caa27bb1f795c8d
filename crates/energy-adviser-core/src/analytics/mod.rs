//! Consumption analytics
//!
//! Five independent analyzers (summary, outliers, peak hours, night/day split,
//! trend) each take the same ordered slice of readings. [`AnalysisReport`]
//! runs them all and feeds the combined result into the recommendation rules.

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::models::Reading;

pub mod night;
pub mod outliers;
pub mod peak_hours;
pub mod recommendations;
pub mod summary;
pub mod trends;


pub use night::{analyze_night_consumption, analyze_night_consumption_with, NightConsumption};
pub use outliers::{detect_outliers, detect_outliers_with, Outlier, OutlierSeverity};
pub use peak_hours::{analyze_peak_hours, HourlyConsumption, PeakHours};
pub use recommendations::{
    generate_recommendations, generate_recommendations_with, Priority, Recommendation,
};
pub use summary::{calculate_summary, Summary};
pub use trends::{calculate_trends, calculate_trends_with, Trend, TrendDirection};

/// Partial analysis consumed by the recommendation rules.
///
/// Any part may be absent; the rule that depends on it is skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outliers: Option<Vec<Outlier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_hours: Option<PeakHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night_consumption: Option<NightConsumption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trends: Option<Trend>,
}

impl Analysis {
    /// Run every analyzer over the same readings
    pub fn compute(readings: &[Reading], thresholds: &Thresholds) -> Self {
        Self {
            summary: Some(calculate_summary(readings)),
            outliers: Some(detect_outliers_with(readings, thresholds)),
            peak_hours: Some(analyze_peak_hours(readings)),
            night_consumption: Some(analyze_night_consumption_with(readings, thresholds)),
            trends: Some(calculate_trends_with(readings, thresholds)),
        }
    }
}

/// Complete diagnostic report for one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub analysis: Analysis,
    /// Never empty
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    /// Compute the full report with default thresholds
    ///
    /// # Performance
    /// Linear in the number of readings, plus a sort over at most 24 hour buckets
    pub fn compute(readings: &[Reading]) -> Self {
        Self::compute_with(readings, &Thresholds::default())
    }

    /// Compute the full report with configured thresholds
    pub fn compute_with(readings: &[Reading], thresholds: &Thresholds) -> Self {
        let analysis = Analysis::compute(readings, thresholds);
        let recommendations = generate_recommendations_with(&analysis, thresholds);

        tracing::trace!(
            readings = readings.len(),
            recommendations = recommendations.len(),
            "Analysis report computed"
        );

        Self {
            analysis,
            recommendations,
        }
    }
}

/// Round half away from zero to `places` decimals
///
/// Tiny negatives that round away come back as `0.0`, never `-0.0`.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Arithmetic mean, 0 for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Numerator over denominator, 0 when the denominator is 0
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
