//! Document store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist JSON documents under `(user, collection, id)`.
//! - Validate document ids before they reach SQL.
//!
//! # Invariants
//! - `set_document` is a wholesale upsert.
//! - `list_document_ids` returns ids in ascending order.
//! - `delete_document` is idempotent.
//! - Stored bodies that fail to parse surface as `InvalidData`.

use crate::db::DbError;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const MAX_DOC_ID_BYTES: usize = 1500;

pub type RepoResult<T> = Result<T, RepoError>;

/// Per-user sub-collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Planners,
    WheelOfLife,
    Habits,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planners => "planners",
            Self::WheelOfLife => "wheelOfLife",
            Self::Habits => "habits",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = RepoError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "planners" => Ok(Self::Planners),
            "wheelOfLife" => Ok(Self::WheelOfLife),
            "habits" => Ok(Self::Habits),
            other => Err(RepoError::InvalidData(format!(
                "unknown collection `{other}`"
            ))),
        }
    }
}

/// Error for document persistence and decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Body could not be encoded to or decoded from JSON.
    Serialization(serde_json::Error),
    /// Document id is empty, too long or contains `/`.
    InvalidDocumentId(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "document encoding failed: {err}"),
            Self::InvalidDocumentId(id) => write!(f, "invalid document id `{id}`"),
            Self::InvalidData(message) => write!(f, "invalid stored document: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidDocumentId(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Checks a document id and returns it trimmed.
pub fn validate_doc_id(doc_id: &str) -> RepoResult<&str> {
    let trimmed = doc_id.trim();
    if trimmed.is_empty() || trimmed.contains('/') || trimmed.len() > MAX_DOC_ID_BYTES {
        return Err(RepoError::InvalidDocumentId(doc_id.to_string()));
    }
    Ok(trimmed)
}

/// Per-user document collections.
pub trait DocumentStore {
    /// Writes `body` under `doc_id`, replacing any previous document.
    fn set_document(
        &self,
        user_id: &str,
        collection: Collection,
        doc_id: &str,
        body: &serde_json::Value,
    ) -> RepoResult<()>;

    fn get_document(
        &self,
        user_id: &str,
        collection: Collection,
        doc_id: &str,
    ) -> RepoResult<Option<serde_json::Value>>;

    fn list_document_ids(&self, user_id: &str, collection: Collection) -> RepoResult<Vec<String>>;

    /// Returns whether a document was removed.
    fn delete_document(&self, user_id: &str, collection: Collection, doc_id: &str)
        -> RepoResult<bool>;

    /// Inserts `body` under a freshly generated id and returns that id.
    fn add_document(
        &self,
        user_id: &str,
        collection: Collection,
        body: &serde_json::Value,
    ) -> RepoResult<String> {
        let doc_id = Uuid::new_v4().simple().to_string();
        self.set_document(user_id, collection, &doc_id, body)?;
        Ok(doc_id)
    }
}

/// Typed helpers over any [`DocumentStore`].
pub trait DocumentStoreExt: DocumentStore {
    fn put<T: Serialize>(
        &self,
        user_id: &str,
        collection: Collection,
        doc_id: &str,
        value: &T,
    ) -> RepoResult<()> {
        let body = serde_json::to_value(value)?;
        self.set_document(user_id, collection, doc_id, &body)
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        user_id: &str,
        collection: Collection,
        doc_id: &str,
    ) -> RepoResult<Option<T>> {
        match self.get_document(user_id, collection, doc_id)? {
            Some(body) => serde_json::from_value(body).map(Some).map_err(|err| {
                RepoError::InvalidData(format!("{collection}/{doc_id}: {err}"))
            }),
            None => Ok(None),
        }
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

/// SQLite-backed document store.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDocumentStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn set_document(
        &self,
        user_id: &str,
        collection: Collection,
        doc_id: &str,
        body: &serde_json::Value,
    ) -> RepoResult<()> {
        let doc_id = validate_doc_id(doc_id)?;
        let encoded = serde_json::to_string(body)?;

        self.conn
            .execute(
                "INSERT INTO documents (user_id, collection, doc_id, body)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (user_id, collection, doc_id) DO UPDATE SET
                    body = excluded.body,
                    updated_at = (strftime('%s', 'now') * 1000);",
                params![user_id, collection.as_str(), doc_id, encoded],
            )
            .map_err(|err| {
                error!(
                    "event=doc_set module=repo status=error collection={collection} error={err}"
                );
                err
            })?;

        debug!(
            "event=doc_set module=repo status=ok collection={collection} bytes={}",
            encoded.len()
        );
        Ok(())
    }

    fn get_document(
        &self,
        user_id: &str,
        collection: Collection,
        doc_id: &str,
    ) -> RepoResult<Option<serde_json::Value>> {
        let doc_id = validate_doc_id(doc_id)?;
        let encoded: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM documents
                 WHERE user_id = ?1 AND collection = ?2 AND doc_id = ?3;",
                params![user_id, collection.as_str(), doc_id],
                |row| row.get(0),
            )
            .optional()?;

        match encoded {
            Some(text) => serde_json::from_str(&text).map(Some).map_err(|err| {
                RepoError::InvalidData(format!("{collection}/{doc_id} body is not JSON: {err}"))
            }),
            None => Ok(None),
        }
    }

    fn list_document_ids(&self, user_id: &str, collection: Collection) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT doc_id FROM documents
             WHERE user_id = ?1 AND collection = ?2
             ORDER BY doc_id ASC;",
        )?;
        let ids = stmt
            .query_map(params![user_id, collection.as_str()], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    fn delete_document(
        &self,
        user_id: &str,
        collection: Collection,
        doc_id: &str,
    ) -> RepoResult<bool> {
        let doc_id = validate_doc_id(doc_id)?;
        let changed = self.conn.execute(
            "DELETE FROM documents
             WHERE user_id = ?1 AND collection = ?2 AND doc_id = ?3;",
            params![user_id, collection.as_str(), doc_id],
        )?;
        Ok(changed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_doc_id, Collection, RepoError};

    #[test]
    fn doc_ids_are_trimmed_and_validated() {
        assert_eq!(validate_doc_id("  Week 1 ").unwrap(), "Week 1");
        assert!(matches!(
            validate_doc_id("a/b"),
            Err(RepoError::InvalidDocumentId(_))
        ));
        assert!(validate_doc_id("   ").is_err());
        assert!(validate_doc_id(&"x".repeat(1501)).is_err());
    }

    #[test]
    fn collection_names_round_trip() {
        for collection in [Collection::Planners, Collection::WheelOfLife, Collection::Habits] {
            assert_eq!(collection.as_str().parse::<Collection>().unwrap(), collection);
        }
        assert!("users".parse::<Collection>().is_err());
    }
}
