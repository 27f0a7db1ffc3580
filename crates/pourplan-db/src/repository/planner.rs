//! # Planner Repository
//!
//! Reads and writes [`EventSettings`] and [`Catalog`] documents for one scope.
//! Every read goes to the store, so callers always work on a fresh copy.

use pourplan_core::{Catalog, CoreError, EventSettings};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::store::{DocumentKey, DocumentStore};

/// Typed repository over a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct PlannerRepository<S> {
    store: S,
    scope: Option<String>,
}

impl<S: DocumentStore> PlannerRepository<S> {
    /// Creates a repository over the shared (unscoped) documents.
    pub fn new(store: S) -> Self {
        PlannerRepository { store, scope: None }
    }

    /// Creates a repository over one user's documents.
    pub fn scoped(store: S, scope: impl Into<String>) -> Self {
        PlannerRepository {
            store,
            scope: Some(scope.into()),
        }
    }

    /// The scope this repository reads and writes.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Reads a document as raw JSON.
    pub async fn raw(&self, key: DocumentKey) -> DbResult<Option<Value>> {
        self.store.read(key, self.scope()).await
    }

    async fn load(&self, key: DocumentKey) -> DbResult<Value> {
        self.raw(key)
            .await?
            .ok_or_else(|| DbError::not_found("document", key.as_str()))
    }

    async fn save<T: Serialize>(&self, key: DocumentKey, document: &T) -> DbResult<()> {
        let value = serde_json::to_value(document).map_err(|e| DbError::Internal(e.to_string()))?;
        self.store.write(key, &value, self.scope()).await?;
        debug!(key = %key, scope = ?self.scope, "Saved document");
        Ok(())
    }

    /// Loads the event settings.
    ///
    /// ## Errors
    /// - `NotFound` when no settings document exists
    /// - `InvalidDocument` when it does not decode
    pub async fn settings(&self) -> DbResult<EventSettings> {
        let value = self.load(DocumentKey::Settings).await?;
        EventSettings::from_document(&value).map_err(|e| invalid(DocumentKey::Settings, e))
    }

    /// Replaces the event settings.
    pub async fn save_settings(&self, settings: &EventSettings) -> DbResult<()> {
        self.save(DocumentKey::Settings, settings).await
    }

    /// Loads the catalog.
    pub async fn catalog(&self) -> DbResult<Catalog> {
        let value = self.load(DocumentKey::Catalog).await?;
        Catalog::from_document(&value).map_err(|e| invalid(DocumentKey::Catalog, e))
    }

    /// Replaces the catalog.
    pub async fn save_catalog(&self, catalog: &Catalog) -> DbResult<()> {
        self.save(DocumentKey::Catalog, catalog).await
    }

    /// Writes the given documents when neither exists in this scope.
    ///
    /// Returns `true` when the defaults were written.
    pub async fn seed_if_empty(&self, settings: &EventSettings, catalog: &Catalog) -> DbResult<bool> {
        for key in DocumentKey::ALL {
            if self.raw(key).await?.is_some() {
                return Ok(false);
            }
        }

        self.save_settings(settings).await?;
        self.save_catalog(catalog).await?;

        info!(scope = ?self.scope, "Seeded default settings and catalog");
        Ok(true)
    }
}

fn invalid(key: DocumentKey, err: CoreError) -> DbError {
    DbError::invalid_document(key.as_str(), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults;
    use crate::pool::{Database, DbConfig};
    use crate::store::json_file::JsonFileStore;
    use crate::store::sqlite::SqliteDocumentStore;
    use pourplan_core::Money;
    use serde_json::json;
    use std::sync::Arc;

    async fn sqlite_repo() -> PlannerRepository<SqliteDocumentStore> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        PlannerRepository::new(db.documents())
    }

    #[tokio::test]
    async fn test_missing_settings_is_not_found() {
        let repo = sqlite_repo().await;
        let result = repo.settings().await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let repo = sqlite_repo().await;
        let mut settings = defaults::settings().unwrap();
        settings.ticket_price = Money::from_cents(2750);

        repo.save_settings(&settings).await.unwrap();
        assert_eq!(repo.settings().await.unwrap(), settings);
    }

    #[tokio::test]
    async fn test_catalog_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = PlannerRepository::new(JsonFileStore::new(dir.path()));
        let catalog = defaults::catalog().unwrap();

        repo.save_catalog(&catalog).await.unwrap();
        assert_eq!(repo.catalog().await.unwrap(), catalog);
    }

    #[tokio::test]
    async fn test_undecodable_settings_is_invalid_document() {
        let repo = sqlite_repo().await;
        repo.store
            .write(DocumentKey::Settings, &json!({ "guests": 10 }), None)
            .await
            .unwrap();

        let result = repo.settings().await;
        assert!(matches!(
            result,
            Err(DbError::InvalidDocument { ref key, .. }) if key == "settings"
        ));
    }

    #[tokio::test]
    async fn test_scoped_repositories_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let alice = PlannerRepository::scoped(db.documents(), "alice");
        let bob = PlannerRepository::scoped(db.documents(), "bob");

        let mut settings = defaults::settings().unwrap();
        settings.guests = 12;
        alice.save_settings(&settings).await.unwrap();

        assert_eq!(alice.settings().await.unwrap().guests, 12);
        assert!(matches!(bob.settings().await, Err(DbError::NotFound { .. })));
        assert_eq!(alice.scope(), Some("alice"));
    }

    #[tokio::test]
    async fn test_seed_if_empty_keeps_existing_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::new(dir.path()));
        let repo = PlannerRepository::new(store);

        let settings = defaults::settings().unwrap();
        let catalog = defaults::catalog().unwrap();
        assert!(repo.seed_if_empty(&settings, &catalog).await.unwrap());

        let mut edited = catalog.clone();
        edited.remove_ingredient("Mint");
        repo.save_catalog(&edited).await.unwrap();

        assert!(!repo.seed_if_empty(&settings, &catalog).await.unwrap());
        assert!(!repo.catalog().await.unwrap().ingredients.contains_key("Mint"));
    }
}
