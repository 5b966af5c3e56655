//! Planner productivity metrics.
//!
//! Every scheduled cell is one planned hour. Metrics are a pure linear scan
//! over the schedule; the grid holds at most 119 cells.

use crate::model::activity::GroupedActivities;
use crate::model::category::ValueCategory;
use crate::model::planner::PlannerDocument;
use crate::model::schedule::ScheduleData;
use serde::Serialize;

/// Scheduled hours per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTally {
    pub hlv: u32,
    pub hdv: u32,
    pub ldv: u32,
    pub zv: u32,
}

impl CategoryTally {
    pub fn from_schedule(schedule: &ScheduleData) -> Self {
        let mut tally = Self::default();
        for (_, _, cell) in schedule.scheduled_cells() {
            *tally.slot_mut(cell.category) += 1;
        }
        tally
    }

    pub fn get(&self, category: ValueCategory) -> u32 {
        match category {
            ValueCategory::Hlv => self.hlv,
            ValueCategory::Hdv => self.hdv,
            ValueCategory::Ldv => self.ldv,
            ValueCategory::Zv => self.zv,
        }
    }

    fn slot_mut(&mut self, category: ValueCategory) -> &mut u32 {
        match category {
            ValueCategory::Hlv => &mut self.hlv,
            ValueCategory::Hdv => &mut self.hdv,
            ValueCategory::Ldv => &mut self.ldv,
            ValueCategory::Zv => &mut self.zv,
        }
    }

    /// Total planned hours.
    pub fn total(&self) -> u32 {
        self.hlv + self.hdv + self.ldv + self.zv
    }

    /// Weighted average on a 1..=4 scale; `None` when nothing is scheduled.
    pub fn productivity_score(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: u32 = ValueCategory::ALL
            .iter()
            .map(|category| category.weight() * self.get(*category))
            .sum();
        Some(f64::from(weighted) / f64::from(total))
    }

    /// Category with the most hours. Ties go to the later category in
    /// canonical order.
    pub fn most_frequent(&self) -> Option<ValueCategory> {
        if self.total() == 0 {
            return None;
        }
        ValueCategory::ALL
            .into_iter()
            .reduce(|best, next| {
                if self.get(best) > self.get(next) {
                    best
                } else {
                    next
                }
            })
    }

    /// Rounded share of `category` in percent; `0` when nothing is scheduled.
    pub fn percent(&self, category: ValueCategory) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (f64::from(self.get(category)) * 100.0 / f64::from(total)).round() as u32
    }

    /// Pie chart slices in canonical order.
    pub fn chart_slices(&self) -> Vec<ChartSlice> {
        ValueCategory::ALL
            .into_iter()
            .map(|category| ChartSlice {
                code: category.code(),
                label: category.display_name(),
                color: category.color(),
                hours: self.get(category),
                percent: self.percent(category),
            })
            .collect()
    }
}

/// One pie chart segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub code: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub hours: u32,
    pub percent: u32,
}

/// Summary card shown beside the weekly grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerSummary {
    pub tally: CategoryTally,
    pub total_hours: u32,
    pub most_frequent: Option<ValueCategory>,
    pub total_activities: usize,
    pub productivity_score: Option<f64>,
}

impl PlannerSummary {
    pub fn compute(schedule: &ScheduleData, activities: &GroupedActivities) -> Self {
        let tally = CategoryTally::from_schedule(schedule);
        Self {
            tally,
            total_hours: tally.total(),
            most_frequent: tally.most_frequent(),
            total_activities: activities.total(),
            productivity_score: tally.productivity_score(),
        }
    }

    pub fn for_planner(planner: &PlannerDocument) -> Self {
        Self::compute(&planner.weekly_schedule, &planner.activities)
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryTally, PlannerSummary};
    use crate::model::category::ValueCategory;
    use crate::model::planner::PlannerDocument;
    use crate::model::schedule::{ScheduleCell, ScheduleData, TimeSlot, Weekday};

    fn schedule_with(entries: &[(u8, Weekday, ValueCategory)]) -> ScheduleData {
        let mut schedule = ScheduleData::default();
        for (hour, day, category) in entries {
            let cell = ScheduleCell::new(category.code(), *category);
            schedule
                .assign(TimeSlot::new(*hour).unwrap(), *day, &cell, 1)
                .unwrap();
        }
        schedule
    }

    #[test]
    fn tally_sums_to_scheduled_cells() {
        let schedule = schedule_with(&[
            (8, Weekday::Monday, ValueCategory::Hlv),
            (9, Weekday::Monday, ValueCategory::Hlv),
            (9, Weekday::Tuesday, ValueCategory::Hdv),
            (20, Weekday::Sunday, ValueCategory::Zv),
        ]);
        let tally = CategoryTally::from_schedule(&schedule);
        assert_eq!(
            tally,
            CategoryTally {
                hlv: 2,
                hdv: 1,
                ldv: 0,
                zv: 1
            }
        );
        assert_eq!(tally.total() as usize, schedule.scheduled_count());
    }

    #[test]
    fn productivity_score_is_weighted_average() {
        let schedule = schedule_with(&[
            (8, Weekday::Monday, ValueCategory::Hlv),
            (9, Weekday::Monday, ValueCategory::Zv),
        ]);
        let tally = CategoryTally::from_schedule(&schedule);
        assert_eq!(tally.productivity_score(), Some(2.5));
        assert_eq!(CategoryTally::default().productivity_score(), None);
    }

    #[test]
    fn most_frequent_breaks_ties_towards_later_category() {
        let tally = CategoryTally {
            hlv: 3,
            hdv: 3,
            ldv: 1,
            zv: 0,
        };
        assert_eq!(tally.most_frequent(), Some(ValueCategory::Hdv));
        assert_eq!(CategoryTally::default().most_frequent(), None);
    }

    #[test]
    fn chart_slices_report_rounded_percentages() {
        let tally = CategoryTally {
            hlv: 1,
            hdv: 1,
            ldv: 1,
            zv: 0,
        };
        let slices = tally.chart_slices();
        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0].percent, 33);
        assert_eq!(slices[3].percent, 0);
        assert_eq!(slices[0].color, "#16a34a");
        assert_eq!(slices[3].label, "ZERO DOLLAR VALUE");
    }

    #[test]
    fn summary_counts_activities_and_hours() {
        let mut planner = PlannerDocument::new("Week");
        planner.activities.add(ValueCategory::Hlv, "Gym").unwrap();
        planner.activities.add(ValueCategory::Ldv, "Email").unwrap();
        planner
            .assign_activity(
                TimeSlot::new(10).unwrap(),
                Weekday::Wednesday,
                ValueCategory::Hlv,
                "Gym",
                3,
            )
            .unwrap();

        let summary = PlannerSummary::for_planner(&planner);
        assert_eq!(summary.total_hours, 3);
        assert_eq!(summary.total_activities, 2);
        assert_eq!(summary.most_frequent, Some(ValueCategory::Hlv));
        assert_eq!(summary.productivity_score, Some(4.0));
    }
}
