//! Productivity planner use-cases.
//!
//! # Invariants
//! - A planner is stored wholesale under its title; activities and schedule
//!   are written together in one document.
//! - Saving without a title is rejected before touching storage.

use crate::analytics::productivity::PlannerSummary;
use crate::model::planner::PlannerDocument;
use crate::model::ModelError;
use crate::repo::document_repo::{
    validate_doc_id, Collection, DocumentStore, DocumentStoreExt, RepoError, RepoResult,
};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum PlannerServiceError {
    MissingTitle,
    /// Title cannot be used as a document id (contains `/` or is too long).
    InvalidTitle(String),
    PlannerNotFound(String),
    Model(ModelError),
    Repo(RepoError),
}

impl Display for PlannerServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "planner title must not be empty"),
            Self::InvalidTitle(title) => write!(f, "invalid planner title `{title}`"),
            Self::PlannerNotFound(title) => write!(f, "planner not found: `{title}`"),
            Self::Model(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PlannerServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PlannerServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::InvalidDocumentId(title) if title.trim().is_empty() => Self::MissingTitle,
            RepoError::InvalidDocumentId(title) => Self::InvalidTitle(title),
            other => Self::Repo(other),
        }
    }
}

impl From<ModelError> for PlannerServiceError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

/// Planner facade bound to one user.
pub struct PlannerService<S: DocumentStore> {
    store: S,
    user_id: String,
}

impl<S: DocumentStore> PlannerService<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    /// Titles of all saved planners, ascending.
    pub fn list_planners(&self) -> RepoResult<Vec<String>> {
        self.store
            .list_document_ids(&self.user_id, Collection::Planners)
            .inspect_err(|err| {
                error!("event=planner_list module=service status=error error={err}");
            })
    }

    /// Writes the whole planner under its title (last-write-wins).
    pub fn save_planner(&self, planner: &PlannerDocument) -> Result<(), PlannerServiceError> {
        if planner.title.trim().is_empty() {
            return Err(PlannerServiceError::MissingTitle);
        }
        let title = validate_doc_id(&planner.title)?;
        let mut stored = planner.clone();
        stored.title = title.to_string();

        self.store
            .put(&self.user_id, Collection::Planners, title, &stored)
            .inspect_err(|err| {
                error!("event=planner_save module=service status=error error={err}");
            })?;
        info!(
            "event=planner_save module=service status=ok activities={} cells={}",
            stored.activities.total(),
            stored.weekly_schedule.scheduled_count()
        );
        Ok(())
    }

    /// Loads a planner by title; `None` when it was never saved.
    pub fn load_planner(&self, title: &str) -> Result<Option<PlannerDocument>, PlannerServiceError> {
        let title = validate_doc_id(title)?;
        let loaded: Option<PlannerDocument> = self
            .store
            .fetch(&self.user_id, Collection::Planners, title)
            .inspect_err(|err| {
                error!("event=planner_load module=service status=error error={err}");
            })?;
        info!(
            "event=planner_load module=service status=ok found={}",
            loaded.is_some()
        );
        Ok(loaded)
    }

    /// Loads a planner, falling back to an empty one carrying `title`.
    pub fn load_or_default(&self, title: &str) -> Result<PlannerDocument, PlannerServiceError> {
        Ok(self
            .load_planner(title)?
            .unwrap_or_else(|| PlannerDocument::new(title.trim())))
    }

    /// Loads, edits and saves a planner in one step.
    ///
    /// Missing planners start empty. The edit's error aborts the save.
    pub fn update_planner<T>(
        &self,
        title: &str,
        edit: impl FnOnce(&mut PlannerDocument) -> Result<T, ModelError>,
    ) -> Result<(PlannerDocument, T), PlannerServiceError> {
        let mut planner = self.load_or_default(title)?;
        let outcome = edit(&mut planner)?;
        self.save_planner(&planner)?;
        Ok((planner, outcome))
    }

    /// Edits an existing planner, saving only when the edit reports a
    /// change by returning `Some`.
    ///
    /// # Errors
    /// - [`PlannerServiceError::PlannerNotFound`] when `title` was never
    ///   saved; nothing is written.
    pub fn edit_planner<T>(
        &self,
        title: &str,
        edit: impl FnOnce(&mut PlannerDocument) -> Result<Option<T>, ModelError>,
    ) -> Result<Option<(PlannerDocument, T)>, PlannerServiceError> {
        let mut planner = self
            .load_planner(title)?
            .ok_or_else(|| PlannerServiceError::PlannerNotFound(title.trim().to_string()))?;
        let Some(outcome) = edit(&mut planner)? else {
            info!("event=planner_edit module=service status=unchanged");
            return Ok(None);
        };
        self.save_planner(&planner)?;
        Ok(Some((planner, outcome)))
    }

    pub fn delete_planner(&self, title: &str) -> Result<(), PlannerServiceError> {
        let title = validate_doc_id(title)?;
        if !self
            .store
            .delete_document(&self.user_id, Collection::Planners, title)?
        {
            return Err(PlannerServiceError::PlannerNotFound(title.to_string()));
        }
        info!("event=planner_delete module=service status=ok");
        Ok(())
    }

    pub fn summary(&self, title: &str) -> Result<PlannerSummary, PlannerServiceError> {
        let planner = self
            .load_planner(title)?
            .ok_or_else(|| PlannerServiceError::PlannerNotFound(title.trim().to_string()))?;
        Ok(PlannerSummary::for_planner(&planner))
    }
}
