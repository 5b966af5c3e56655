//! Productivity planner document.

use super::activity::GroupedActivities;
use super::category::ValueCategory;
use super::schedule::{ScheduleCell, ScheduleData, TimeSlot, Weekday};
use super::ModelError;
use serde::{Deserialize, Serialize};

/// One saved weekly planner. Stored under its title in `planners`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerDocument {
    pub title: String,
    #[serde(default)]
    pub activities: GroupedActivities,
    #[serde(default)]
    pub weekly_schedule: ScheduleData,
}

impl PlannerDocument {
    /// Empty planner carrying `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Schedules a known activity for `duration_hours` starting at `start`.
    ///
    /// # Errors
    /// - [`ModelError::UnknownActivity`] when `name` is not in `category`.
    /// - [`ModelError::ZeroDuration`] when `duration_hours == 0`.
    pub fn assign_activity(
        &mut self,
        start: TimeSlot,
        day: Weekday,
        category: ValueCategory,
        name: &str,
        duration_hours: usize,
    ) -> Result<Vec<TimeSlot>, ModelError> {
        let name = name.trim();
        if !self.activities.contains(category, name) {
            return Err(ModelError::UnknownActivity {
                category,
                name: name.to_string(),
            });
        }
        let cell = ScheduleCell::new(name, category);
        self.weekly_schedule.assign(start, day, &cell, duration_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::PlannerDocument;
    use crate::model::category::ValueCategory;
    use crate::model::schedule::{TimeSlot, Weekday};
    use crate::model::ModelError;

    #[test]
    fn assign_requires_a_known_activity() {
        let mut planner = PlannerDocument::new("Week 42");
        planner.activities.add(ValueCategory::Hlv, "Run").unwrap();

        let start: TimeSlot = "08:00".parse().unwrap();
        let written = planner
            .assign_activity(start, Weekday::Monday, ValueCategory::Hlv, " Run ", 2)
            .unwrap();
        assert_eq!(written.len(), 2);

        let err = planner
            .assign_activity(start, Weekday::Monday, ValueCategory::Hdv, "Run", 1)
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownActivity { .. }));
    }

    #[test]
    fn serializes_with_document_field_names() {
        let planner = PlannerDocument::new("Focus");
        let json = serde_json::to_value(&planner).unwrap();
        assert_eq!(json["title"], "Focus");
        assert!(json.get("weeklySchedule").is_some());
        assert!(json["activities"].get("HIGH LIFE TIME (HLV)").is_some());
    }
}
