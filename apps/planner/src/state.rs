//! # Planner State
//!
//! Shared handle used by every command.
//!
//! ## Concurrency
//! Reads go straight to the store. Commands that modify a document do a
//! read-modify-write, so they hold `write_lock` for the whole cycle; two
//! concurrent edits never overwrite each other's changes.

use std::sync::Arc;

use pourplan_db::{
    defaults, Database, DbConfig, DocumentStore, JsonFileStore, PlannerRepository,
};
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::config::{PlannerConfig, StoreBackend};
use crate::error::ApiError;

/// Repository over whichever backend the config selected.
pub type SharedRepository = PlannerRepository<Arc<dyn DocumentStore>>;

/// State handed to every command.
pub struct PlannerState {
    repo: SharedRepository,
    write_lock: Mutex<()>,
}

impl PlannerState {
    /// Wraps an already opened store.
    pub fn new(store: Arc<dyn DocumentStore>, scope: Option<String>) -> Self {
        let repo = match scope {
            Some(scope) => PlannerRepository::scoped(store, scope),
            None => PlannerRepository::new(store),
        };
        PlannerState {
            repo,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the configured store and writes the default documents on first
    /// start.
    pub async fn open(config: &PlannerConfig) -> Result<Self, ApiError> {
        let store: Arc<dyn DocumentStore> = match &config.backend {
            StoreBackend::Sqlite(path) => {
                info!(path = %path.display(), "Using SQLite document store");
                Arc::new(Database::new(DbConfig::new(path)).await?.documents())
            }
            StoreBackend::JsonFiles(dir) => {
                info!(dir = %dir.display(), "Using JSON file document store");
                Arc::new(JsonFileStore::new(dir))
            }
        };

        let state = PlannerState::new(store, config.scope.clone());
        state
            .repo
            .seed_if_empty(&defaults::settings()?, &defaults::catalog()?)
            .await?;
        Ok(state)
    }

    /// Repository for reads.
    pub fn repo(&self) -> &SharedRepository {
        &self.repo
    }

    /// Acquires the write lock for a read-modify-write cycle.
    pub async fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_json_store_seeds_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig {
            backend: StoreBackend::JsonFiles(dir.path().to_path_buf()),
            scope: None,
        };

        let state = PlannerState::open(&config).await.unwrap();
        assert_eq!(state.repo().settings().await.unwrap().guests, 80);
        assert!(dir.path().join("catalog.json").exists());
    }

    #[tokio::test]
    async fn test_open_sqlite_store_with_scope() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig {
            backend: StoreBackend::Sqlite(dir.path().join("pourplan.db")),
            scope: Some("team-a".to_string()),
        };

        let state = PlannerState::open(&config).await.unwrap();
        assert_eq!(state.repo().scope(), Some("team-a"));
        assert!(state.repo().catalog().await.unwrap().ingredients.contains_key("Lime"));
    }
}
