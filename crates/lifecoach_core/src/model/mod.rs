//! Coaching domain model.
//!
//! # Responsibility
//! - Define the planner, wheel-of-life and habit documents.
//! - Own every editing invariant so services only orchestrate storage.
//!
//! # Invariants
//! - Field names on the wire match the stored document shape
//!   (`weeklySchedule`, `firstName`, `HIGH LIFE TIME (HLV)`...).
//! - Wheel scores are always within `[0, 10]`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod activity;
pub mod category;
pub mod habit;
pub mod planner;
pub mod schedule;
pub mod wheel;

/// Validation failure raised by model editing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Activity or habit name is empty after trimming.
    EmptyName,
    /// Category index is past the end of its activity list.
    ActivityIndexOutOfRange {
        category: category::ValueCategory,
        index: usize,
        len: usize,
    },
    /// Activity is not part of the planner's activity set.
    UnknownActivity {
        category: category::ValueCategory,
        name: String,
    },
    /// Assignment duration must cover at least one slot.
    ZeroDuration,
    /// Time label is malformed or outside the grid.
    InvalidTimeSlot(String),
    /// Day label is not an English weekday name.
    InvalidWeekday(String),
    /// Category label is not one of HLV/HDV/LDV/ZV.
    InvalidCategory(String),
    /// Life area label is not one of the ten wheel areas.
    InvalidLifeArea(String),
    /// Date label is not in `DD-Mon-YY` form.
    InvalidDateLabel(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::ActivityIndexOutOfRange {
                category,
                index,
                len,
            } => write!(
                f,
                "activity index {index} out of range for {} ({len} activities)",
                category.code()
            ),
            Self::UnknownActivity { category, name } => {
                write!(f, "unknown activity `{name}` in {}", category.code())
            }
            Self::ZeroDuration => write!(f, "duration must be at least one hour"),
            Self::InvalidTimeSlot(value) => write!(f, "invalid time slot `{value}`"),
            Self::InvalidWeekday(value) => write!(f, "invalid weekday `{value}`"),
            Self::InvalidCategory(value) => write!(f, "invalid category `{value}`"),
            Self::InvalidLifeArea(value) => write!(f, "invalid life area `{value}`"),
            Self::InvalidDateLabel(value) => write!(f, "invalid date label `{value}`"),
        }
    }
}

impl Error for ModelError {}
