//! Habit tracker use-cases.

use crate::model::habit::Habit;
use crate::model::wheel::LifeArea;
use crate::model::ModelError;
use crate::repo::document_repo::{
    Collection, DocumentStore, DocumentStoreExt, RepoError, RepoResult,
};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum HabitServiceError {
    Model(ModelError),
    HabitNotFound(String),
    Repo(RepoError),
}

impl Display for HabitServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(err) => write!(f, "{err}"),
            Self::HabitNotFound(id) => write!(f, "habit not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for HabitServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::HabitNotFound(_) => None,
        }
    }
}

impl From<ModelError> for HabitServiceError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<RepoError> for HabitServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Habit facade bound to one user.
pub struct HabitService<S: DocumentStore> {
    store: S,
    user_id: String,
}

impl<S: DocumentStore> HabitService<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    /// All habits ordered by id.
    ///
    /// Habits whose stored body no longer decodes are skipped with a
    /// warning; storage failures still abort.
    pub fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        let mut habits = Vec::new();
        for id in self
            .store
            .list_document_ids(&self.user_id, Collection::Habits)?
        {
            match self.fetch(&id) {
                Ok(Some(habit)) => habits.push(habit),
                Ok(None) => {}
                Err(RepoError::InvalidData(reason)) => {
                    warn!("event=habit_list module=service status=skip reason={reason}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(habits)
    }

    fn fetch(&self, id: &str) -> RepoResult<Option<Habit>> {
        let habit: Option<Habit> = self.store.fetch(&self.user_id, Collection::Habits, id)?;
        Ok(habit.map(|mut habit| {
            habit.id = id.to_string();
            habit
        }))
    }

    /// Creates a habit with a generated id.
    pub fn add_habit(&self, name: &str, area: LifeArea) -> Result<Habit, HabitServiceError> {
        let mut habit = Habit::new(name, area)?;
        let body = serde_json::to_value(&habit).map_err(RepoError::from)?;
        habit.id = self
            .store
            .add_document(&self.user_id, Collection::Habits, &body)
            .inspect_err(|err| {
                error!("event=habit_add module=service status=error error={err}");
            })?;
        info!("event=habit_add module=service status=ok area={}", area);
        Ok(habit)
    }

    /// Flips the completed flag and persists it. Returns the updated habit.
    pub fn toggle_habit(&self, id: &str) -> Result<Habit, HabitServiceError> {
        let mut habit = self
            .fetch(id)?
            .ok_or_else(|| HabitServiceError::HabitNotFound(id.to_string()))?;
        habit.toggle();
        self.store
            .put(&self.user_id, Collection::Habits, &habit.id, &habit)
            .inspect_err(|err| {
                error!("event=habit_toggle module=service status=error error={err}");
            })?;
        Ok(habit)
    }

    pub fn delete_habit(&self, id: &str) -> Result<(), HabitServiceError> {
        if !self
            .store
            .delete_document(&self.user_id, Collection::Habits, id)?
        {
            return Err(HabitServiceError::HabitNotFound(id.to_string()));
        }
        info!("event=habit_delete module=service status=ok");
        Ok(())
    }
}
