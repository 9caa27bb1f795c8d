//! Output rendering for CLI commands
//!
//! Every command produces an [`AnalysisOutput`] that renders either as a JSON
//! envelope (`{"success": true, ...}`) or as human-readable tables.

use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use energy_adviser_core::analytics::{
    AnalysisReport, NightConsumption, Outlier, OutlierSeverity, PeakHours, Priority,
    Recommendation, Summary, Trend,
};
use energy_adviser_core::CoreError;
use serde_json::{json, Value};

/// Result of one CLI command
pub enum AnalysisOutput {
    Report(AnalysisReport),
    Summary(Summary),
    Anomalies(Vec<Outlier>),
    PeakHours(PeakHours),
    NightConsumption(NightConsumption),
    Trends(Trend),
}

impl AnalysisOutput {
    /// Short human message, for commands that carry one
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Anomalies(outliers) => Some(anomalies_message(outliers.len())),
            Self::PeakHours(peak) => Some(format!(
                "Peak consumption detected between {}:00 and {}:00",
                peak.peak_start_hour, peak.peak_end_hour
            )),
            Self::NightConsumption(night) => Some(night.message.clone()),
            _ => None,
        }
    }

    pub fn to_envelope(&self) -> Value {
        let message = self.message();
        match self {
            Self::Report(report) => json!({ "success": true, "analysis": report }),
            Self::Summary(summary) => json!({ "success": true, "summary": summary }),
            Self::Anomalies(outliers) => json!({
                "success": true,
                "outliers": outliers,
                "count": outliers.len(),
                "message": message,
            }),
            Self::PeakHours(peak) => json!({
                "success": true,
                "peakHours": peak,
                "message": message,
            }),
            Self::NightConsumption(night) => json!({
                "success": true,
                "nightConsumption": night,
                "message": message,
            }),
            Self::Trends(trend) => json!({ "success": true, "trends": trend }),
        }
    }

    pub fn to_table(&self, no_color: bool) -> String {
        let body = match self {
            Self::Report(report) => format_report(report, no_color),
            Self::Summary(summary) => format_summary(summary, no_color),
            Self::Anomalies(outliers) => format_outliers(outliers, no_color),
            Self::PeakHours(peak) => format_peak_hours(peak, no_color),
            Self::NightConsumption(night) => format_night(night, no_color),
            Self::Trends(trend) => format_trend(trend),
        };

        match self.message() {
            Some(message) => format!("{}\n\n{}", body, message),
            None => body,
        }
    }
}

/// JSON envelope for a failed command
pub fn error_envelope(err: &CoreError) -> Value {
    if err.is_invalid_input() {
        json!({ "success": false, "error": "Invalid data format" })
    } else {
        json!({
            "success": false,
            "error": "Failed to analyze energy data",
            "details": err.to_string(),
        })
    }
}

fn anomalies_message(count: usize) -> String {
    if count > 0 {
        format!("Found {} anomalies in your energy consumption", count)
    } else {
        "No significant anomalies detected".to_string()
    }
}

// ============================================================================
// Formatters
// ============================================================================

fn new_table(headers: &[&str], no_color: bool) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if no_color {
        table.set_header(headers.to_vec());
    } else {
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }

    table
}

fn format_report(report: &AnalysisReport, no_color: bool) -> String {
    let analysis = &report.analysis;
    let mut sections = vec![];

    if let Some(summary) = &analysis.summary {
        sections.push(format!("Summary\n{}", format_summary(summary, no_color)));
    }
    if let Some(outliers) = &analysis.outliers {
        sections.push(format!(
            "Anomalies\n{}\n{}",
            format_outliers(outliers, no_color),
            anomalies_message(outliers.len())
        ));
    }
    if let Some(peak) = &analysis.peak_hours {
        sections.push(format!("Peak hours\n{}", format_peak_hours(peak, no_color)));
    }
    if let Some(night) = &analysis.night_consumption {
        sections.push(format!(
            "Night consumption\n{}\n{}",
            format_night(night, no_color),
            night.message
        ));
    }
    if let Some(trend) = &analysis.trends {
        sections.push(format!("Trend\n{}", format_trend(trend)));
    }
    sections.push(format!(
        "Recommendations\n{}",
        format_recommendations(&report.recommendations, no_color)
    ));

    sections.join("\n\n")
}

fn format_summary(summary: &Summary, no_color: bool) -> String {
    let mut table = new_table(&["Metric", "Value"], no_color);

    let rows = [
        ("Total", format_kwh(summary.total_consumption)),
        ("Average", format_kwh(summary.average_consumption)),
        ("Min", format_kwh(summary.min_consumption)),
        ("Max", format_kwh(summary.max_consumption)),
        ("Data points", summary.data_points.to_string()),
        ("Variance", summary.variance.to_string()),
    ];
    for (metric, value) in rows {
        table.add_row(Row::from(vec![metric.to_string(), value]));
    }

    table.to_string()
}

fn format_outliers(outliers: &[Outlier], no_color: bool) -> String {
    if outliers.is_empty() {
        return "No outliers.".to_string();
    }

    let mut table = new_table(
        &["Timestamp", "Consumption", "Deviation", "Severity"],
        no_color,
    );
    for outlier in outliers {
        let severity = if no_color {
            Cell::new(outlier.severity.label())
        } else {
            let color = match outlier.severity {
                OutlierSeverity::High => Color::Red,
                OutlierSeverity::Medium => Color::Yellow,
            };
            Cell::new(outlier.severity.label()).fg(color)
        };
        table.add_row(vec![
            Cell::new(outlier.timestamp.as_deref().unwrap_or("-")),
            Cell::new(format_kwh(outlier.consumption)),
            Cell::new(format!("{}%", outlier.deviation)),
            severity,
        ]);
    }

    table.to_string()
}

fn format_peak_hours(peak: &PeakHours, no_color: bool) -> String {
    let mut lines = vec![];
    lines.push(format!(
        "Window:           {:02}:00-{:02}:00",
        peak.peak_start_hour, peak.peak_end_hour
    ));
    lines.push(format!(
        "Peak average:     {}",
        format_kwh(peak.peak_consumption)
    ));
    lines.push(format!(
        "Overall average:  {}",
        format_kwh(peak.average_consumption)
    ));

    if !peak.hourly_breakdown.is_empty() {
        let mut table = new_table(&["Hour", "Avg consumption"], no_color);
        for bucket in &peak.hourly_breakdown {
            table.add_row(Row::from(vec![
                format!("{:02}:00", bucket.hour),
                format_kwh(bucket.consumption),
            ]));
        }
        lines.push(table.to_string());
    }

    lines.join("\n")
}

fn format_night(night: &NightConsumption, no_color: bool) -> String {
    let mut table = new_table(&["Band", "Hours", "Avg consumption"], no_color);
    table.add_row(Row::from(vec![
        "Night".to_string(),
        "00-05".to_string(),
        format_kwh(night.night_consumption),
    ]));
    table.add_row(Row::from(vec![
        "Day".to_string(),
        "06-18".to_string(),
        format_kwh(night.day_consumption),
    ]));
    table.add_row(Row::from(vec![
        "Evening".to_string(),
        "19-23".to_string(),
        format_kwh(night.evening_consumption),
    ]));

    format!(
        "{}\nNight / day:      {}%",
        table, night.night_percentage
    )
}

fn format_trend(trend: &Trend) -> String {
    [
        format!("Direction:        {}", trend.trend.label()),
        format!("Change:           {:+}%", trend.percentage_change),
        format!("First half avg:   {}", format_kwh(trend.first_half)),
        format!("Second half avg:  {}", format_kwh(trend.second_half)),
    ]
    .join("\n")
}

fn format_recommendations(recommendations: &[Recommendation], no_color: bool) -> String {
    let mut table = new_table(&["Priority", "Title", "Description", "Impact"], no_color);

    for rec in recommendations {
        let priority = if no_color {
            Cell::new(rec.priority.label())
        } else {
            let color = match rec.priority {
                Priority::High => Color::Red,
                Priority::Medium => Color::Yellow,
                Priority::Low => Color::Green,
            };
            Cell::new(rec.priority.label()).fg(color)
        };
        table.add_row(vec![
            priority,
            Cell::new(&rec.title),
            Cell::new(&rec.description),
            Cell::new(&rec.impact),
        ]);
    }

    table.to_string()
}

// ============================================================================
// Utilities
// ============================================================================

fn format_kwh(value: f64) -> String {
    format!("{} kWh", value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use energy_adviser_core::analytics::{
        analyze_night_consumption, analyze_peak_hours, detect_outliers,
    };
    use energy_adviser_core::Reading;

    fn idle_readings() -> Vec<Reading> {
        vec![
            Reading::new(Some("2024-01-01T02:00:00Z"), 5.0),
            Reading::new(Some("2024-01-01T14:00:00Z"), 1.0),
            Reading::new(Some("2024-01-01T15:00:00Z"), 1.0),
        ]
    }

    #[test]
    fn test_anomalies_envelope_without_outliers() {
        let output = AnalysisOutput::Anomalies(detect_outliers(&idle_readings()));
        let json = output.to_envelope();

        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 0);
        assert_eq!(json["message"], "No significant anomalies detected");
        assert!(json["outliers"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_anomalies_message_with_count() {
        assert_eq!(
            anomalies_message(2),
            "Found 2 anomalies in your energy consumption"
        );
    }

    #[test]
    fn test_peak_hours_envelope() {
        let output = AnalysisOutput::PeakHours(analyze_peak_hours(&idle_readings()));
        let json = output.to_envelope();

        assert_eq!(json["peakHours"]["peakStartHour"], 2);
        assert_eq!(json["peakHours"]["peakEndHour"], 15);
        assert_eq!(
            json["message"],
            "Peak consumption detected between 2:00 and 15:00"
        );
    }

    #[test]
    fn test_night_envelope_carries_message() {
        let output = AnalysisOutput::NightConsumption(analyze_night_consumption(&idle_readings()));
        let json = output.to_envelope();

        assert_eq!(json["nightConsumption"]["nightPercentage"], 500.0);
        assert_eq!(json["message"], json["nightConsumption"]["message"]);
    }

    #[test]
    fn test_report_envelope_nests_analysis() {
        let output = AnalysisOutput::Report(AnalysisReport::compute(&idle_readings()));
        let json = output.to_envelope();

        assert_eq!(json["success"], true);
        assert_eq!(json["analysis"]["summary"]["dataPoints"], 3);
        assert_eq!(
            json["analysis"]["recommendations"][0]["category"],
            "idle-consumption"
        );
        assert!(json.get("message").is_none());
    }

    #[test]
    fn test_error_envelope_invalid_input() {
        let err = CoreError::invalid_input("expected an array of readings");
        let json = error_envelope(&err);

        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid data format");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_envelope_other_errors_have_details() {
        let err = CoreError::FileNotFound {
            path: "absent.json".into(),
        };
        let json = error_envelope(&err);

        assert_eq!(json["success"], false);
        assert!(json["details"].as_str().unwrap().contains("absent.json"));
    }

    #[test]
    fn test_report_table_no_color() {
        let output = AnalysisOutput::Report(AnalysisReport::compute(&idle_readings()));
        let table = output.to_table(true);

        assert!(table.contains("Summary"));
        assert!(table.contains("Reduce Idle Consumption"));
        assert!(table.contains("No outliers."));
        assert!(!table.contains("\u{1b}["));
    }

    #[test]
    fn test_summary_table_appends_no_message() {
        let output = AnalysisOutput::Summary(Summary::default());
        let table = output.to_table(true);

        assert!(table.contains("Data points"));
        assert!(output.message().is_none());
    }
}
