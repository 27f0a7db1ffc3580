//! # JSON File Store
//!
//! One pretty-printed JSON file per document, the local-development backend.
//!
//! ```text
//! <data_dir>/
//! ├── settings.json
//! ├── catalog.json
//! └── user-42/
//!     ├── settings.json
//!     └── catalog.json
//! ```
//!
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash never leaves a half-written document behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{check_scope, DocumentKey, DocumentStore};

/// [`DocumentStore`] over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    /// Root data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path of a document.
    pub fn path_for(&self, key: DocumentKey, scope: Option<&str>) -> DbResult<PathBuf> {
        let mut path = self.dir.clone();
        if let Some(scope) = scope {
            check_scope(scope)?;
            path.push(scope);
        }
        path.push(format!("{}.json", key.as_str()));
        Ok(path)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn read(&self, key: DocumentKey, scope: Option<&str>) -> DbResult<Option<Value>> {
        let path = self.path_for(key, scope)?;

        let text = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Document file absent");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let document = serde_json::from_str(&text)
            .map_err(|e| DbError::invalid_document(key.as_str(), e.to_string()))?;

        debug!(path = %path.display(), "Read document");
        Ok(Some(document))
    }

    async fn write(&self, key: DocumentKey, document: &Value, scope: Option<&str>) -> DbResult<()> {
        let path = self.path_for(key, scope)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut text =
            serde_json::to_string_pretty(document).map_err(|e| DbError::Internal(e.to_string()))?;
        text.push('\n');

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text).await?;
        fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), "Wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.read(DocumentKey::Catalog, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let doc = json!({ "ingredients": {}, "cocktails": {} });

        store.write(DocumentKey::Catalog, &doc, None).await.unwrap();

        assert!(dir.path().join("catalog.json").exists());
        assert!(!dir.path().join("catalog.json.tmp").exists());
        assert_eq!(store.read(DocumentKey::Catalog, None).await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store
            .write(DocumentKey::Settings, &json!({ "guests": 80 }), None)
            .await
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert_eq!(text, "{\n  \"guests\": 80\n}\n");
    }

    #[tokio::test]
    async fn test_scoped_documents_live_in_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store
            .write(DocumentKey::Settings, &json!({ "guests": 5 }), Some("user-42"))
            .await
            .unwrap();

        assert!(dir.path().join("user-42").join("settings.json").exists());
        assert!(store.read(DocumentKey::Settings, None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_scope_cannot_escape_directory() {
        let store = JsonFileStore::new("/tmp/pourplan-unused");
        assert!(matches!(
            store.path_for(DocumentKey::Settings, Some("..")),
            Err(DbError::InvalidScope(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_file_is_invalid_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

        let store = JsonFileStore::new(dir.path());
        let result = store.read(DocumentKey::Settings, None).await;
        assert!(matches!(result, Err(DbError::InvalidDocument { .. })));
    }
}
