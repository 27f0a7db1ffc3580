//! # Repository Module
//!
//! Typed access to the planner documents on top of any [`DocumentStore`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                                                                │
//! │       │  repo.settings() / repo.save_catalog(&catalog)                  │
//! │       ▼                                                                 │
//! │  PlannerRepository<S>   ← decode / encode, NotFound, InvalidDocument   │
//! │       │  read(key, scope) / write(key, value, scope)                    │
//! │       ▼                                                                 │
//! │  S: DocumentStore       ← SQLite or JSON files                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`DocumentStore`]: crate::store::DocumentStore

pub mod planner;
