//! Night / day / evening consumption split
//!
//! Night consumption relative to day consumption is a proxy for standby load:
//! devices left on while nobody uses them.

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::config::Thresholds;
use crate::models::Reading;

/// Fixed hour bands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    /// 00:00-05:59
    Night,
    /// 06:00-18:59
    Day,
    /// 19:00-23:59
    Evening,
}

impl Band {
    fn of_hour(hour: u32) -> Option<Self> {
        match hour {
            0..=5 => Some(Band::Night),
            6..=18 => Some(Band::Day),
            19..=23 => Some(Band::Evening),
            _ => None,
        }
    }
}

/// Running average for one band
#[derive(Default)]
struct BandAggregate {
    total: f64,
    count: usize,
}

impl BandAggregate {
    fn push(&mut self, value: f64) {
        self.total += value;
        self.count += 1;
    }

    fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Band averages and idle-consumption ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightConsumption {
    pub night_consumption: f64,
    pub day_consumption: f64,
    pub evening_consumption: f64,
    /// Night average as a percentage of the day average (1 decimal)
    pub night_percentage: f64,
    pub message: String,
}

impl NightConsumption {
    /// Placeholder for empty input
    pub fn insufficient() -> Self {
        Self {
            night_consumption: 0.0,
            day_consumption: 0.0,
            evening_consumption: 0.0,
            night_percentage: 0.0,
            message: "Insufficient data".to_string(),
        }
    }
}

/// Analyze night consumption with default thresholds
pub fn analyze_night_consumption(readings: &[Reading]) -> NightConsumption {
    analyze_night_consumption_with(readings, &Thresholds::default())
}

/// Analyze night (idle) consumption
///
/// Readings without an hour are skipped. A band with no readings averages 0,
/// and a non-positive day average yields a night percentage of 0.
pub fn analyze_night_consumption_with(
    readings: &[Reading],
    thresholds: &Thresholds,
) -> NightConsumption {
    if readings.is_empty() {
        return NightConsumption::insufficient();
    }

    let mut night = BandAggregate::default();
    let mut day = BandAggregate::default();
    let mut evening = BandAggregate::default();

    for reading in readings {
        match reading.hour().and_then(Band::of_hour) {
            Some(Band::Night) => night.push(reading.consumption),
            Some(Band::Day) => day.push(reading.consumption),
            Some(Band::Evening) => evening.push(reading.consumption),
            None => {}
        }
    }

    let night_avg = night.average();
    let day_avg = day.average();
    // Net-export nights (negative averages) clamp to 0
    let night_percentage = if day_avg > 0.0 {
        (night_avg / day_avg * 100.0).max(0.0)
    } else {
        0.0
    };

    let message = if night_percentage > thresholds.idle_night_pct {
        format!(
            "Your night consumption is {:.1}% of day consumption - consider checking for idle devices",
            night_percentage
        )
    } else {
        format!(
            "Your night consumption is normal at {:.1}% of day consumption",
            night_percentage
        )
    };

    NightConsumption {
        night_consumption: round_to(night_avg, 2),
        day_consumption: round_to(day_avg, 2),
        evening_consumption: round_to(evening.average(), 2),
        night_percentage: round_to(night_percentage, 1),
        message,
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
        let night = analyze_night_consumption(&[]);
        assert_eq!(night, NightConsumption::insufficient());
        assert_eq!(night.message, "Insufficient data");
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::of_hour(0), Some(Band::Night));
        assert_eq!(Band::of_hour(5), Some(Band::Night));
        assert_eq!(Band::of_hour(6), Some(Band::Day));
        assert_eq!(Band::of_hour(18), Some(Band::Day));
        assert_eq!(Band::of_hour(19), Some(Band::Evening));
        assert_eq!(Band::of_hour(23), Some(Band::Evening));
        assert_eq!(Band::of_hour(24), None);
    }

    #[test]
    fn test_idle_warning() {
        let readings = vec![at(2, 5.0), at(14, 1.0), at(15, 1.0)];
        let night = analyze_night_consumption(&readings);

        assert_eq!(night.night_consumption, 5.0);
        assert_eq!(night.day_consumption, 1.0);
        assert_eq!(night.evening_consumption, 0.0);
        assert_eq!(night.night_percentage, 500.0);
        assert_eq!(
            night.message,
            "Your night consumption is 500.0% of day consumption - consider checking for idle devices"
        );
    }

    #[test]
    fn test_normal_message() {
        let readings = vec![at(1, 1.0), at(10, 10.0), at(20, 4.0)];
        let night = analyze_night_consumption(&readings);

        assert_eq!(night.night_percentage, 10.0);
        assert_eq!(night.evening_consumption, 4.0);
        assert_eq!(
            night.message,
            "Your night consumption is normal at 10.0% of day consumption"
        );
    }

    #[test]
    fn test_no_day_readings() {
        let readings = vec![at(1, 3.0), at(21, 2.0)];
        let night = analyze_night_consumption(&readings);

        assert_eq!(night.night_percentage, 0.0);
        assert!(night.night_percentage.is_finite());
        assert!(night.message.contains("normal at 0.0%"));
    }

    #[test]
    fn test_untimed_readings_skipped() {
        let readings = vec![Reading::untimed(50.0), at(12, 2.0), at(4, 1.0)];
        let night = analyze_night_consumption(&readings);
        assert_eq!(night.day_consumption, 2.0);
        assert_eq!(night.night_percentage, 50.0);
    }

    #[test]
    fn test_custom_idle_threshold() {
        let readings = vec![at(2, 4.0), at(12, 10.0)];
        let relaxed = Thresholds {
            idle_night_pct: 50.0,
            ..Thresholds::default()
        };
        let night = analyze_night_consumption_with(&readings, &relaxed);
        assert!(night.message.starts_with("Your night consumption is normal"));
    }
}
