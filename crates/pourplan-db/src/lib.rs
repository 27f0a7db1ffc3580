//! # pourplan-db: Document Store Layer for Pourplan
//!
//! Persists the `settings` and `catalog` documents, either in SQLite or as
//! JSON files, and decodes them into `pourplan-core` types.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pourplan Data Flow                               │
//! │                                                                         │
//! │  Planner command (calculate)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   pourplan-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │  Repository   │   │ DocumentStore  │   │   Database    │  │   │
//! │  │   │ (planner.rs)  │──►│ sqlite.rs      │──►│   (pool.rs)   │  │   │
//! │  │   │ typed decode  │   │ json_file.rs   │   │ 001_kv_store  │  │   │
//! │  │   └───────────────┘   └────────────────┘   └───────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file  or  <data_dir>/{settings,catalog}.json                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`store`] - `DocumentStore` trait and its two backends
//! - [`repository`] - Typed planner repository
//! - [`defaults`] - Built-in first-start documents
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pourplan_db::{Database, DbConfig, PlannerRepository};
//!
//! let db = Database::new(DbConfig::new("pourplan.db")).await?;
//! let repo = PlannerRepository::new(db.documents());
//! let settings = repo.settings().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod defaults;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::planner::PlannerRepository;
pub use store::json_file::JsonFileStore;
pub use store::sqlite::SqliteDocumentStore;
pub use store::{DocumentKey, DocumentStore};
