//! Peak consumption hours
//!
//! Buckets readings by hour of day, averages each bucket and ranks hours to
//! find the window where consumption concentrates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{mean, round_to};
use crate::models::Reading;

/// Number of top-ranked hours that span the peak window
const PEAK_WINDOW_HOURS: usize = 3;

/// Average consumption for one hour of day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyConsumption {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Bucket average (2 decimals)
    pub consumption: f64,
}

/// Peak window and hourly profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHours {
    pub peak_start_hour: u32,
    pub peak_end_hour: u32,
    /// Average of the top-ranked hour (2 decimals)
    pub peak_consumption: f64,
    /// Mean of the hourly averages, not weighted by bucket size (2 decimals)
    pub average_consumption: f64,
    /// Present hours only, ascending by hour
    pub hourly_breakdown: Vec<HourlyConsumption>,
}

/// Analyze peak consumption hours
///
/// # Algorithm
/// - Group readings by hour of day (readings without an hour are skipped)
/// - Average each bucket and rank by descending average; equal averages
///   keep ascending hour order
/// - The three top-ranked hours, sorted, give the start and end of the
///   window. The window is not checked for contiguity.
///
/// # Graceful Degradation
/// Empty input or no usable timestamps: all-zero result, empty breakdown
pub fn analyze_peak_hours(readings: &[Reading]) -> PeakHours {
    let mut buckets: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for reading in readings {
        let Some(hour) = reading.hour() else {
            continue;
        };
        buckets.entry(hour).or_default().push(reading.consumption);
    }

    if buckets.is_empty() {
        if !readings.is_empty() {
            tracing::debug!(
                readings = readings.len(),
                "No reading carries a usable timestamp, peak hours unavailable"
            );
        }
        return PeakHours::default();
    }

    // BTreeMap iteration is hour-ascending, so the stable sort below breaks
    // ties by hour
    let hourly: Vec<(u32, f64)> = buckets
        .iter()
        .map(|(&hour, values)| (hour, mean(values)))
        .collect();

    let mut ranked = hourly.clone();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let (_, peak_average) = ranked[0];
    let window: Vec<u32> = ranked
        .iter()
        .take(PEAK_WINDOW_HOURS)
        .map(|&(hour, _)| hour)
        .collect();
    let peak_start_hour = window.iter().copied().min().unwrap_or(0);
    let peak_end_hour = window.iter().copied().max().unwrap_or(0);

    let averages: Vec<f64> = hourly.iter().map(|&(_, avg)| avg).collect();

    PeakHours {
        peak_start_hour,
        peak_end_hour,
        peak_consumption: round_to(peak_average, 2),
        average_consumption: round_to(mean(&averages), 2),
        hourly_breakdown: hourly
            .into_iter()
            .map(|(hour, avg)| HourlyConsumption {
                hour,
                consumption: round_to(avg, 2),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, value: f64) -> Reading {
        Reading::new(Some(format!("2024-01-01T{hour:02}:00:00Z")), value)
    }

    #[test]
    fn test_empty() {
        let peak = analyze_peak_hours(&[]);
        assert_eq!(peak, PeakHours::default());
        assert!(peak.hourly_breakdown.is_empty());
    }

    #[test]
    fn test_no_timestamps() {
        let readings = vec![Reading::untimed(5.0), Reading::untimed(7.0)];
        assert_eq!(analyze_peak_hours(&readings), PeakHours::default());
    }

    #[test]
    fn test_peak_window() {
        let readings = vec![
            at(7, 1.0),
            at(18, 4.0),
            at(19, 5.0),
            at(20, 3.0),
            at(3, 0.5),
        ];
        let peak = analyze_peak_hours(&readings);

        assert_eq!(peak.peak_start_hour, 18);
        assert_eq!(peak.peak_end_hour, 20);
        assert_eq!(peak.peak_consumption, 5.0);
        assert_eq!(peak.average_consumption, 2.7);
        let hours: Vec<u32> = peak.hourly_breakdown.iter().map(|h| h.hour).collect();
        assert_eq!(hours, vec![3, 7, 18, 19, 20]);
    }

    #[test]
    fn test_window_is_not_contiguous() {
        let readings = vec![at(1, 9.0), at(12, 8.0), at(22, 7.0), at(13, 1.0)];
        let peak = analyze_peak_hours(&readings);
        assert_eq!((peak.peak_start_hour, peak.peak_end_hour), (1, 22));
    }

    #[test]
    fn test_mean_of_means() {
        // Hour 8 has three readings averaging 2, hour 9 one reading of 4
        let readings = vec![at(8, 1.0), at(8, 2.0), at(8, 3.0), at(9, 4.0)];
        let peak = analyze_peak_hours(&readings);

        assert_eq!(peak.average_consumption, 3.0);
        assert_eq!(peak.hourly_breakdown[0].consumption, 2.0);
        assert_eq!(peak.peak_consumption, 4.0);
    }

    #[test]
    fn test_ties_rank_by_hour() {
        let readings: Vec<_> = [5, 2, 9, 14, 0].into_iter().map(|h| at(h, 1.0)).collect();
        let peak = analyze_peak_hours(&readings);
        // Top three of equal averages are hours 0, 2, 5
        assert_eq!((peak.peak_start_hour, peak.peak_end_hour), (0, 5));
    }

    #[test]
    fn test_single_hour() {
        let peak = analyze_peak_hours(&[at(17, 2.346)]);
        assert_eq!((peak.peak_start_hour, peak.peak_end_hour), (17, 17));
        assert_eq!(peak.peak_consumption, 2.35);
    }

    #[test]
    fn test_untimed_readings_skipped() {
        let readings = vec![at(10, 2.0), Reading::untimed(100.0), at(10, 4.0)];
        let peak = analyze_peak_hours(&readings);
        assert_eq!(peak.hourly_breakdown.len(), 1);
        assert_eq!(peak.peak_consumption, 3.0);
    }
}
