//! Habit tracker entries.

use super::activity::normalize_name;
use super::wheel::LifeArea;
use super::ModelError;
use serde::{Deserialize, Serialize};

/// One tracked habit. `id` is the document id in the `habits` collection and
/// is not part of the stored body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub category: LifeArea,
    #[serde(default)]
    pub completed: bool,
}

impl Habit {
    /// New, not yet completed habit. The id is assigned on insert.
    pub fn new(name: &str, category: LifeArea) -> Result<Self, ModelError> {
        Ok(Self {
            id: String::new(),
            name: normalize_name(name).ok_or(ModelError::EmptyName)?,
            category,
            completed: false,
        })
    }

    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::Habit;
    use crate::model::wheel::LifeArea;

    #[test]
    fn new_habit_starts_incomplete() {
        let mut habit = Habit::new(" Meditate ", LifeArea::Mind).unwrap();
        assert_eq!(habit.name, "Meditate");
        assert!(!habit.completed);
        assert!(habit.toggle());
        assert!(!habit.toggle());
    }

    #[test]
    fn stored_body_has_no_id() {
        let habit = Habit::new("Stretch", LifeArea::Body).unwrap();
        let json = serde_json::to_value(&habit).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["category"], "Body");
        assert!(Habit::new("  ", LifeArea::Body).is_err());
    }
}
