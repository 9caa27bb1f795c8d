//! Actionable recommendations
//!
//! Rule-based advice derived from a combined [`Analysis`]. Rules are
//! independent and evaluated in declaration order:
//! - Night consumption above the idle threshold → reduce idle consumption
//! - Peak hours available → shift peak usage
//! - Any high-severity outlier → investigate unusual usage
//! - Increasing trend above the rising threshold → address rising consumption
//! - Nothing fired → general efficiency tips

use serde::{Deserialize, Serialize};

use super::outliers::OutlierSeverity;
use super::trends::TrendDirection;
use super::Analysis;
use crate::config::Thresholds;

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One piece of advice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stable machine-readable category (e.g. `idle-consumption`)
    pub category: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub impact: String,
}

impl Recommendation {
    fn new(
        category: &str,
        priority: Priority,
        title: &str,
        description: String,
        impact: &str,
    ) -> Self {
        Self {
            category: category.to_string(),
            priority,
            title: title.to_string(),
            description,
            impact: impact.to_string(),
        }
    }
}

type Rule = fn(&Analysis, &Thresholds) -> Option<Recommendation>;

/// Evaluation order is output order
const RULES: &[Rule] = &[
    idle_consumption,
    peak_shifting,
    anomaly_investigation,
    consumption_trend,
];

fn idle_consumption(analysis: &Analysis, thresholds: &Thresholds) -> Option<Recommendation> {
    let night = analysis.night_consumption.as_ref()?;
    if night.night_percentage <= thresholds.idle_night_pct {
        return None;
    }

    Some(Recommendation::new(
        "idle-consumption",
        Priority::High,
        "Reduce Idle Consumption",
        format!(
            "Your night consumption is {}% of day consumption. Check for devices left on during the night, use smart plugs, or enable sleep modes.",
            night.night_percentage
        ),
        "Could save 10-20% on energy bills",
    ))
}

fn peak_shifting(analysis: &Analysis, _thresholds: &Thresholds) -> Option<Recommendation> {
    let peak = analysis.peak_hours.as_ref()?;

    Some(Recommendation::new(
        "peak-shifting",
        Priority::Medium,
        "Shift Peak Usage",
        format!(
            "Peak consumption occurs between {}:00 and {}:00. Consider moving high-consumption activities to off-peak hours.",
            peak.peak_start_hour, peak.peak_end_hour
        ),
        "Could save 5-15% during peak hours",
    ))
}

fn anomaly_investigation(analysis: &Analysis, _thresholds: &Thresholds) -> Option<Recommendation> {
    let high_count = analysis
        .outliers
        .as_ref()?
        .iter()
        .filter(|o| o.severity == OutlierSeverity::High)
        .count();
    if high_count == 0 {
        return None;
    }

    Some(Recommendation::new(
        "anomaly-investigation",
        Priority::High,
        "Investigate Unusual Usage",
        format!(
            "Detected {} instance(s) of unusually high consumption. Check for malfunctioning appliances or unexpected device usage.",
            high_count
        ),
        "Could identify equipment issues early",
    ))
}

fn consumption_trend(analysis: &Analysis, thresholds: &Thresholds) -> Option<Recommendation> {
    let trend = analysis.trends.as_ref()?;
    if trend.trend != TrendDirection::Increasing
        || trend.percentage_change <= thresholds.rising_trend_pct
    {
        return None;
    }

    Some(Recommendation::new(
        "consumption-trend",
        Priority::Medium,
        "Address Rising Consumption",
        format!(
            "Your consumption increased by {}% in recent period. Review recent appliance purchases or usage changes.",
            trend.percentage_change
        ),
        "Could prevent further increases",
    ))
}

fn general_efficiency() -> Recommendation {
    Recommendation::new(
        "general-efficiency",
        Priority::Low,
        "General Efficiency Tips",
        "Your consumption patterns look healthy. Continue monitoring for anomalies and consider regular efficiency audits.".to_string(),
        "Maintain current efficiency levels",
    )
}

/// Generate recommendations with default thresholds
pub fn generate_recommendations(analysis: &Analysis) -> Vec<Recommendation> {
    generate_recommendations_with(analysis, &Thresholds::default())
}

/// Generate recommendations from a (possibly partial) analysis
///
/// Never returns an empty vec: when no rule fires, a single low-priority
/// general efficiency recommendation is returned.
pub fn generate_recommendations_with(
    analysis: &Analysis,
    thresholds: &Thresholds,
) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter_map(|rule| rule(analysis, thresholds))
        .collect();

    if recommendations.is_empty() {
        recommendations.push(general_efficiency());
    }

    recommendations
}
