//! # Document Stores
//!
//! A planner keeps exactly two JSON documents, `settings` and `catalog`.
//! [`DocumentStore`] is the seam between the caller layer and the backend.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         dyn DocumentStore                               │
//! │                 read(key, scope) / write(key, doc, scope)               │
//! │                                                                         │
//! │   ┌──────────────────────────────┐   ┌──────────────────────────────┐  │
//! │   │     SqliteDocumentStore      │   │        JsonFileStore         │  │
//! │   │  kv_store(key, scope, value) │   │  <dir>/settings.json         │  │
//! │   │  upsert, last write wins     │   │  <dir>/<scope>/catalog.json  │  │
//! │   └──────────────────────────────┘   └──────────────────────────────┘  │
//! │        POURPLAN_DATABASE_PATH              POURPLAN_DATA_DIR            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stores deal in raw [`Value`]s; decoding into typed documents happens in
//! [`crate::repository::planner::PlannerRepository`].

pub mod json_file;
pub mod sqlite;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DbError, DbResult};

/// Names of the stored documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    Settings,
    Catalog,
}

impl DocumentKey {
    pub const ALL: [DocumentKey; 2] = [DocumentKey::Settings, DocumentKey::Catalog];

    /// Storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKey::Settings => "settings",
            DocumentKey::Catalog => "catalog",
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value persistence of whole JSON documents.
///
/// `scope` partitions documents per user; `None` is the shared partition.
/// Writes replace the whole document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document, `None` if it was never written.
    async fn read(&self, key: DocumentKey, scope: Option<&str>) -> DbResult<Option<Value>>;

    /// Writes (inserts or replaces) a document.
    async fn write(&self, key: DocumentKey, document: &Value, scope: Option<&str>) -> DbResult<()>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    async fn read(&self, key: DocumentKey, scope: Option<&str>) -> DbResult<Option<Value>> {
        (**self).read(key, scope).await
    }

    async fn write(&self, key: DocumentKey, document: &Value, scope: Option<&str>) -> DbResult<()> {
        (**self).write(key, document, scope).await
    }
}

/// Rejects scope ids that are empty or could escape a directory.
pub(crate) fn check_scope(scope: &str) -> DbResult<()> {
    let valid = !scope.is_empty()
        && scope.len() <= 64
        && scope
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidScope(scope.to_string()))
    }
}
