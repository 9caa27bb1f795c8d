//! Consumption trend
//!
//! Compares the mean of the first half of the series with the mean of the
//! second half. Input order is taken as chronological.

use serde::{Deserialize, Serialize};

use super::{mean, ratio_or_zero, round_to};
use crate::config::Thresholds;
use crate::models::Reading;

/// Trend classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

/// Half-over-half trend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trend {
    pub trend: TrendDirection,
    /// Second half vs first half, percent (1 decimal)
    pub percentage_change: f64,
    /// Mean of the first half (2 decimals)
    pub first_half: f64,
    /// Mean of the second half (2 decimals)
    pub second_half: f64,
}

/// Calculate the trend with default thresholds
pub fn calculate_trends(readings: &[Reading]) -> Trend {
    calculate_trends_with(readings, &Thresholds::default())
}

/// Calculate the consumption trend
///
/// The series splits at `n / 2`; with an odd count the second half holds
/// the extra reading. A zero first-half mean yields a change of 0.
pub fn calculate_trends_with(readings: &[Reading], thresholds: &Thresholds) -> Trend {
    if readings.len() < 2 {
        return Trend::default();
    }

    let values: Vec<f64> = readings.iter().map(|r| r.consumption).collect();
    let (first, second) = values.split_at(values.len() / 2);
    let first_half = mean(first);
    let second_half = mean(second);

    let percentage_change = ratio_or_zero(second_half - first_half, first_half) * 100.0;

    let trend = if percentage_change > thresholds.trend_band_pct {
        TrendDirection::Increasing
    } else if percentage_change < -thresholds.trend_band_pct {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    Trend {
        trend,
        percentage_change: round_to(percentage_change, 1),
        first_half: round_to(first_half, 2),
        second_half: round_to(second_half, 2),
    }
}
