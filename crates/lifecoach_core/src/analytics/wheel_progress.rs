//! Wheel of Life progress and comparison views.

use crate::model::wheel::{parse_date_label, LifeArea, WheelEntry};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

/// Number of most recent entries plotted on the progress chart.
pub const PROGRESS_WINDOW: usize = 5;

/// One point of the total-score line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: String,
    pub total_score: f64,
}

/// Picks the latest [`PROGRESS_WINDOW`] entries and returns them oldest first.
///
/// Entries are ordered by their parsed date label; labels that do not parse
/// sort before every dated entry and then by text.
pub fn progress_series(entries: &[(String, WheelEntry)]) -> Vec<ProgressPoint> {
    let mut keyed: Vec<(Option<NaiveDate>, &str, &WheelEntry)> = entries
        .iter()
        .map(|(doc_id, entry)| (parse_date_label(doc_id).ok(), doc_id.as_str(), entry))
        .collect();
    keyed.sort_by(|a, b| compare_newest_first((a.0, a.1), (b.0, b.1)));

    let mut points: Vec<ProgressPoint> = keyed
        .into_iter()
        .take(PROGRESS_WINDOW)
        .map(|(_, doc_id, entry)| ProgressPoint {
            date: doc_id.to_string(),
            total_score: entry.total_score(),
        })
        .collect();
    points.reverse();
    points
}

fn compare_newest_first(a: (Option<NaiveDate>, &str), b: (Option<NaiveDate>, &str)) -> Ordering {
    b.0.cmp(&a.0).then_with(|| b.1.cmp(a.1))
}

/// Per-area score difference between two assessments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaDelta {
    pub area: LifeArea,
    pub current: f64,
    pub comparison: f64,
    pub delta: f64,
}

/// Current entry overlaid with an earlier (or later) one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelComparison {
    pub current_date: String,
    pub comparison_date: String,
    pub current_total: f64,
    pub comparison_total: f64,
    pub areas: Vec<AreaDelta>,
}

impl WheelComparison {
    pub fn between(current: &WheelEntry, comparison: &WheelEntry) -> Self {
        let areas = LifeArea::ALL
            .into_iter()
            .map(|area| {
                let now = current.score(area);
                let then = comparison.score(area);
                AreaDelta {
                    area,
                    current: now,
                    comparison: then,
                    delta: ((now - then) * 10.0).round() / 10.0,
                }
            })
            .collect();

        Self {
            current_date: current.date.clone(),
            comparison_date: comparison.date.clone(),
            current_total: current.total_score(),
            comparison_total: comparison.total_score(),
            areas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{progress_series, WheelComparison, PROGRESS_WINDOW};
    use crate::model::wheel::{LifeArea, WheelEntry};

    fn entry(date: &str, body: f64) -> (String, WheelEntry) {
        let mut entry = WheelEntry::new("Sam", date);
        entry.set_score(LifeArea::Body, body);
        (date.to_string(), entry.filled())
    }

    #[test]
    fn progress_keeps_latest_five_in_chronological_order() {
        let entries = vec![
            entry("01-Jan-26", 1.0),
            entry("15-Mar-26", 3.0),
            entry("02-Feb-26", 2.0),
            entry("10-Oct-26", 6.0),
            entry("01-May-26", 4.0),
            entry("20-Jul-26", 5.0),
        ];
        let series = progress_series(&entries);
        assert_eq!(series.len(), PROGRESS_WINDOW);
        let dates: Vec<&str> = series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["02-Feb-26", "15-Mar-26", "01-May-26", "20-Jul-26", "10-Oct-26"]
        );
        assert_eq!(series[4].total_score, 6.0);
    }

    #[test]
    fn progress_of_nothing_is_empty() {
        assert!(progress_series(&[]).is_empty());
    }

    #[test]
    fn comparison_reports_per_area_delta() {
        let (_, now) = entry("10-Oct-26", 8.0);
        let (_, then) = entry("01-Jan-26", 5.5);
        let comparison = WheelComparison::between(&now, &then);
        assert_eq!(comparison.areas.len(), 10);
        assert_eq!(comparison.areas[0].area, LifeArea::Body);
        assert_eq!(comparison.areas[0].delta, 2.5);
        assert_eq!(comparison.current_total - comparison.comparison_total, 2.5);
    }
}
