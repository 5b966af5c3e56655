//! Wheel of Life use-cases.
//!
//! # Invariants
//! - Entries are stored under their date label; saving the same date twice
//!   replaces the earlier entry.
//! - Stored and loaded entries always carry all ten areas, each score
//!   clamped to `[0, 10]`.

use crate::analytics::wheel_progress::{progress_series, ProgressPoint, WheelComparison};
use crate::model::wheel::WheelEntry;
use crate::repo::document_repo::{
    validate_doc_id, Collection, DocumentStore, DocumentStoreExt, RepoError, RepoResult,
};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum WheelServiceError {
    MissingFirstName,
    MissingDate,
    EntryNotFound(String),
    Repo(RepoError),
}

impl Display for WheelServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFirstName => write!(f, "first name must not be empty"),
            Self::MissingDate => write!(f, "date must not be empty"),
            Self::EntryNotFound(date) => write!(f, "no wheel entry found for `{date}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WheelServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for WheelServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Wheel facade bound to one user.
pub struct WheelService<S: DocumentStore> {
    store: S,
    user_id: String,
}

impl<S: DocumentStore> WheelService<S> {
    pub fn new(store: S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    /// Saves `entry` under its date. Unscored areas are stored as `0`.
    pub fn save_entry(&self, entry: &WheelEntry) -> Result<WheelEntry, WheelServiceError> {
        if entry.first_name.trim().is_empty() {
            return Err(WheelServiceError::MissingFirstName);
        }
        if entry.date.trim().is_empty() {
            return Err(WheelServiceError::MissingDate);
        }
        let date = validate_doc_id(&entry.date)?;

        let mut stored = entry.filled();
        stored.first_name = stored.first_name.trim().to_string();
        stored.date = date.to_string();

        self.store
            .put(&self.user_id, Collection::WheelOfLife, date, &stored)
            .inspect_err(|err| {
                error!("event=wheel_save module=service status=error error={err}");
            })?;
        info!(
            "event=wheel_save module=service status=ok total_score={}",
            stored.total_score()
        );
        Ok(stored)
    }

    pub fn load_entry(&self, date: &str) -> Result<Option<WheelEntry>, WheelServiceError> {
        let date = validate_doc_id(date)?;
        let loaded: Option<WheelEntry> = self
            .store
            .fetch(&self.user_id, Collection::WheelOfLife, date)
            .inspect_err(|err| {
                error!("event=wheel_load module=service status=error error={err}");
            })?;
        Ok(loaded.map(|entry| {
            let mut entry = entry.filled();
            if entry.date.is_empty() {
                entry.date = date.to_string();
            }
            entry
        }))
    }

    fn require_entry(&self, date: &str) -> Result<WheelEntry, WheelServiceError> {
        self.load_entry(date)?
            .ok_or_else(|| WheelServiceError::EntryNotFound(date.trim().to_string()))
    }

    /// Date labels of all saved entries, ascending by id.
    pub fn list_dates(&self) -> RepoResult<Vec<String>> {
        self.store
            .list_document_ids(&self.user_id, Collection::WheelOfLife)
    }

    /// Overlays the entry at `comparison_date` on the one at `current_date`.
    pub fn compare(
        &self,
        current_date: &str,
        comparison_date: &str,
    ) -> Result<WheelComparison, WheelServiceError> {
        let current = self.require_entry(current_date)?;
        let comparison = self.require_entry(comparison_date)?;
        Ok(WheelComparison::between(&current, &comparison))
    }

    /// Total score of the five most recent entries, oldest first.
    ///
    /// Entries whose stored body no longer decodes are skipped with a
    /// warning; storage failures still abort.
    pub fn progress(&self) -> Result<Vec<ProgressPoint>, WheelServiceError> {
        let mut entries = Vec::new();
        for date in self.list_dates()? {
            match self.load_entry(&date) {
                Ok(Some(entry)) => entries.push((date, entry)),
                Ok(None) => {}
                Err(WheelServiceError::Repo(RepoError::InvalidData(reason))) => {
                    warn!("event=wheel_progress module=service status=skip reason={reason}");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(progress_series(&entries))
    }
}
