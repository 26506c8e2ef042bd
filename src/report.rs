//! Text and JSON rendering of scan results

use crate::angle::angle_diff;
use crate::attempt::{format_signed_mss, AttemptComparison};
use crate::config::ScoringParams;
use crate::engine::group_by_date;
use crate::error::WindError;
use crate::pipeline::SegmentReport;
use crate::types::Observation;

pub const SUNRISE_ICON: &str = "☀️";
pub const SUNSET_ICON: &str = "🌑";

const RULE_WIDTH: usize = 67;

/// One-line summary of the thresholds in effect
pub fn config_line(params: &ScoringParams) -> String {
    format!(
        "(Config: winds {}+ mph, tolerance {}°, {}%+ favorability)",
        params.min_wind_speed, params.direction_tolerance, params.quality_percentage
    )
}

/// Render one segment's attempt summary and its opportunities by day
pub fn format_segment(report: &SegmentReport) -> Vec<String> {
    let segment = &report.segment;
    let cmp = &report.comparison;
    let mut lines = vec![
        String::new(),
        format!(
            "{} - {} {}",
            segment.name, segment.distance, segment.direction
        ),
        String::new(),
        format!(
            "KOM  : {} {} {:.1} mph",
            segment.record_holder, segment.record_time, cmp.record_speed
        ),
        format!(
            "Me   : rank {} {} {:.1} mph",
            segment.personal_rank, segment.personal_best_time, cmp.personal_speed
        ),
        format!("Need : {} min {:+.1} mph", time_to_cut(cmp), cmp.speed_deficit),
        String::new(),
        "Favorable Winds:".to_string(),
    ];

    for group in group_by_date(&report.opportunities) {
        let first = &group.opportunities[0].observation;
        lines.push(String::new());
        lines.push(format!(
            "  {} ({} {} - {} {})",
            group.date.format("%Y-%m-%d"),
            SUNRISE_ICON,
            first.sunrise.format("%I:%M %p"),
            SUNSET_ICON,
            first.sunset.format("%I:%M %p"),
        ));

        for opportunity in group.opportunities {
            lines.push(format_opportunity_line(
                report.bearing,
                opportunity.percent(),
                &opportunity.observation,
            ));
        }
    }

    lines.push("-".repeat(RULE_WIDTH));
    lines
}

/// Time change needed to match the record: "-2:00" to cut, "+0:10" of slack
fn time_to_cut(cmp: &AttemptComparison) -> String {
    let change = -cmp.time_deficit_seconds;
    let text = format_signed_mss(change);
    if change.round() > 0.0 {
        format!("+{}", text)
    } else {
        text
    }
}

fn format_opportunity_line(bearing: f64, percent: u32, obs: &Observation) -> String {
    format!(
        "    {} | {:>3.0}° | {:>4.1} mph from {:<3} | {:>3.0}° off | {:>3}% favorable",
        obs.timestamp.format("%I:%M %p"),
        obs.temperature,
        obs.wind_speed,
        obs.wind_cardinal(),
        angle_diff(bearing, obs.wind_bearing),
        percent,
    )
}

/// Full text report for a scan
pub fn render_text(reports: &[SegmentReport], params: &ScoringParams) -> String {
    let mut lines = vec![
        config_line(params),
        String::new(),
        "Potential KOM Opportunities:".to_string(),
        "=".repeat(61),
    ];

    if reports.is_empty() {
        lines.push(String::new());
        lines.push("No segments found with favorable wind conditions".to_string());
    }

    for report in reports {
        lines.extend(format_segment(report));
    }

    lines.join("\n") + "\n"
}

/// Scan results as pretty-printed JSON
pub fn render_json(reports: &[SegmentReport]) -> Result<String, WindError> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Forecast listing, one block per observation
pub fn render_forecast(observations: &[Observation]) -> String {
    let mut lines = vec![
        String::new(),
        "Wind Forecast:".to_string(),
        "=".repeat(50),
    ];

    for obs in observations {
        lines.push(String::new());
        lines.push(format!(
            "{} {}",
            obs.timestamp.format("%Y-%m-%d %H:%M:%S %:z"),
            obs.icon
        ));
        lines.push(format!(
            "Wind:        {:>5.1} mph from the {} ({}°)",
            obs.wind_speed,
            obs.wind_cardinal(),
            obs.wind_bearing
        ));
        match obs.wind_gust {
            Some(gust) => lines.push(format!("Wind Gusts:  {:>5.1} mph", gust)),
            None => lines.push("Wind Gusts:    N/A".to_string()),
        }
        lines.push(format!("Temperature: {:>5.1}°", obs.temperature));
        lines.push(format!("Sunrise:     {}", obs.sunrise.format("%H:%M:%S")));
        lines.push(format!("Sunset:      {}", obs.sunset.format("%H:%M:%S")));
        lines.push("-".repeat(50));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Opportunity, Segment};
    use chrono::{DateTime, FixedOffset, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(4 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, day, hour, minute, 0)
            .unwrap()
    }

    fn opportunity(day: u32, hour: u32, score: f64, bearing: f64) -> Opportunity {
        Opportunity {
            score,
            observation: Observation {
                timestamp: at(day, hour, 0),
                wind_speed: 18.4,
                wind_bearing: bearing,
                wind_gust: None,
                sunrise: at(day, 6, 5),
                sunset: at(day, 21, 10),
                temperature: 71.6,
                icon: String::new(),
            },
        }
    }

    fn sample_report() -> SegmentReport {
        let segment = Segment {
            name: "Airport Sprint".to_string(),
            distance: "10 km".to_string(),
            climb: "3 m".to_string(),
            direction: "W".to_string(),
            record_holder: "Jo Fast".to_string(),
            record_time: "20:00".to_string(),
            record_speed: String::new(),
            personal_rank: "7".to_string(),
            personal_best_time: "22:00".to_string(),
            personal_speed: String::new(),
        };
        let comparison = AttemptComparison::for_segment(&segment).unwrap();
        SegmentReport {
            segment,
            bearing: 270.0,
            comparison,
            opportunities: vec![
                opportunity(3, 15, 0.93, 90.0),
                opportunity(3, 12, 0.81, 80.0),
                opportunity(4, 9, 0.9, 95.0),
            ],
        }
    }

    #[test]
    fn test_format_segment() {
        let lines = format_segment(&sample_report());
        let expected = vec![
            "",
            "Airport Sprint - 10 km W",
            "",
            "KOM  : Jo Fast 20:00 18.6 mph",
            "Me   : rank 7 22:00 16.9 mph",
            "Need : -2:00 min +1.7 mph",
            "",
            "Favorable Winds:",
            "",
            "  2024-06-03 (☀️ 06:05 AM - 🌑 09:10 PM)",
            "    03:00 PM |  72° | 18.4 mph from E   |   0° off |  93% favorable",
            "    12:00 PM |  72° | 18.4 mph from E   |  10° off |  81% favorable",
            "",
            "  2024-06-04 (☀️ 06:05 AM - 🌑 09:10 PM)",
            "    09:00 AM |  72° | 18.4 mph from E   |   5° off |  90% favorable",
            "-------------------------------------------------------------------",
        ];
        assert_eq!(lines, expected);
    }

    #[test]
    fn test_need_line_when_already_faster() {
        let mut report = sample_report();
        report.segment.distance = "1 km".to_string();
        report.segment.record_time = "2:00".to_string();
        report.segment.personal_best_time = "1:50".to_string();
        report.comparison = AttemptComparison::for_segment(&report.segment).unwrap();

        let lines = format_segment(&report);
        assert_eq!(lines[5], "Need : +0:10 min -1.7 mph");
    }

    #[test]
    fn test_render_text_without_opportunities() {
        let text = render_text(&[], &ScoringParams::default());
        assert!(text.starts_with("(Config: winds 12+ mph, tolerance 15°, 60%+ favorability)"));
        assert!(text.contains("No segments found with favorable wind conditions"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[sample_report()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["segment"]["name"], "Airport Sprint");
        assert_eq!(value[0]["comparison"]["time_deficit"], "2:00");
        assert_eq!(value[0]["opportunities"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_render_forecast() {
        let text = render_forecast(&[opportunity(3, 12, 0.0, 92.0).observation]);
        assert!(text.contains("2024-06-03 12:00:00 -04:00"));
        assert!(text.contains("Wind:         18.4 mph from the E (92°)"));
        assert!(text.contains("Wind Gusts:    N/A"));
    }
}
