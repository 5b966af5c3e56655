//! Weekly schedule grid.
//!
//! # Responsibility
//! - Map `(time slot, weekday)` to an optional scheduled activity.
//! - Implement click-to-assign, drag/drop move and clear edits.
//!
//! # Invariants
//! - The grid has 17 hourly slots (`08:00`..`24:00`) for 7 days.
//! - Absent cells and explicit `null` cells both mean "unscheduled".
//! - Overlapping assignments overwrite; there is no undo.

use super::activity::GroupedActivities;
use super::category::ValueCategory;
use super::ModelError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const FIRST_HOUR: u8 = 8;
pub const LAST_HOUR: u8 = 24;
pub const SLOTS_PER_DAY: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;
pub const GRID_CAPACITY: usize = SLOTS_PER_DAY * Weekday::ALL.len();

static TIME_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid time label regex"));

/// One hourly row of the grid, rendered as `HH:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub fn new(hour: u8) -> Result<Self, ModelError> {
        if (FIRST_HOUR..=LAST_HOUR).contains(&hour) {
            Ok(Self(hour))
        } else {
            Err(ModelError::InvalidTimeSlot(format!("{hour:02}:00")))
        }
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    /// Every grid slot, top to bottom.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (FIRST_HOUR..=LAST_HOUR).map(TimeSlot)
    }

    /// Slot `offset` rows below this one, if still inside the grid.
    pub fn offset(self, offset: usize) -> Option<TimeSlot> {
        let hour = usize::from(self.0) + offset;
        if hour <= usize::from(LAST_HOUR) {
            u8::try_from(hour).ok().map(TimeSlot)
        } else {
            None
        }
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeSlot {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || ModelError::InvalidTimeSlot(trimmed.to_string());
        let caps = TIME_LABEL_RE.captures(trimmed).ok_or_else(invalid)?;
        if &caps[2] != "00" {
            return Err(invalid());
        }
        let hour: u8 = caps[1].parse().map_err(|_| invalid())?;
        Self::new(hour).map_err(|_| invalid())
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(D::Error::custom)
    }
}

/// Grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ModelError;

    /// Full English name or its three-letter prefix, any case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.name().to_ascii_lowercase();
                name == lowered || (lowered.len() == 3 && name.starts_with(&lowered))
            })
            .ok_or_else(|| ModelError::InvalidWeekday(value.trim().to_string()))
    }
}

/// Activity placed in one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCell {
    pub activity: String,
    pub category: ValueCategory,
}

impl ScheduleCell {
    pub fn new(activity: impl Into<String>, category: ValueCategory) -> Self {
        Self {
            activity: activity.into(),
            category,
        }
    }
}

/// Sparse `time -> day -> cell` map as stored in planner documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleData {
    rows: BTreeMap<TimeSlot, BTreeMap<Weekday, Option<ScheduleCell>>>,
}

impl ScheduleData {
    pub fn get(&self, slot: TimeSlot, day: Weekday) -> Option<&ScheduleCell> {
        self.rows.get(&slot)?.get(&day)?.as_ref()
    }

    /// Fills `duration_hours` consecutive slots on `day` starting at `start`.
    ///
    /// Slots past the end of the grid are dropped. Returns the slots written.
    ///
    /// # Errors
    /// - [`ModelError::ZeroDuration`] when `duration_hours == 0`.
    pub fn assign(
        &mut self,
        start: TimeSlot,
        day: Weekday,
        cell: &ScheduleCell,
        duration_hours: usize,
    ) -> Result<Vec<TimeSlot>, ModelError> {
        if duration_hours == 0 {
            return Err(ModelError::ZeroDuration);
        }

        let written: Vec<TimeSlot> = (0..duration_hours)
            .map_while(|offset| start.offset(offset))
            .collect();
        for slot in &written {
            self.rows
                .entry(*slot)
                .or_default()
                .insert(day, Some(cell.clone()));
        }
        Ok(written)
    }

    /// Drag/drop: moves the cell at `from` onto `to`, leaving `null` behind.
    ///
    /// Returns `false` without changes when `from == to` or `from` is empty.
    pub fn move_cell(&mut self, from: (TimeSlot, Weekday), to: (TimeSlot, Weekday)) -> bool {
        if from == to {
            return false;
        }
        let Some(moved) = self
            .rows
            .get_mut(&from.0)
            .and_then(|row| row.get_mut(&from.1))
            .and_then(Option::take)
        else {
            return false;
        };
        self.rows.entry(to.0).or_default().insert(to.1, Some(moved));
        true
    }

    /// Unschedules one cell. Returns the removed cell, if any.
    pub fn clear(&mut self, slot: TimeSlot, day: Weekday) -> Option<ScheduleCell> {
        let row = self.rows.get_mut(&slot)?;
        let removed = row.remove(&day).flatten();
        if row.is_empty() {
            self.rows.remove(&slot);
        }
        removed
    }

    /// Scheduled cells in grid order (time, then day).
    pub fn scheduled_cells(&self) -> impl Iterator<Item = (TimeSlot, Weekday, &ScheduleCell)> + '_ {
        self.rows.iter().flat_map(|(slot, row)| {
            row.iter()
                .filter_map(move |(day, cell)| cell.as_ref().map(|cell| (*slot, *day, cell)))
        })
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled_cells().count()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled_count() == 0
    }

    /// Cells naming an activity missing from `activities`.
    pub fn stale_cells<'a>(
        &'a self,
        activities: &'a GroupedActivities,
    ) -> impl Iterator<Item = (TimeSlot, Weekday, &'a ScheduleCell)> + 'a {
        self.scheduled_cells()
            .filter(move |(_, _, cell)| !activities.contains(cell.category, &cell.activity))
    }
}
