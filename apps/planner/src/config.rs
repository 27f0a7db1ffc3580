//! Planner configuration.
//!
//! Loaded from environment variables with fallback to defaults:
//!
//! | Variable                  | Effect                                        |
//! |---------------------------|-----------------------------------------------|
//! | `POURPLAN_DATABASE_PATH`  | Use the SQLite store at this path             |
//! | `POURPLAN_DATA_DIR`       | JSON file store directory (default: app data) |
//! | `POURPLAN_SCOPE`          | Per-user document scope                       |
//!
//! The SQLite store wins when both path variables are set.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Where documents are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// SQLite database file.
    Sqlite(PathBuf),
    /// Directory of JSON documents.
    JsonFiles(PathBuf),
}

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub backend: StoreBackend,

    /// Document scope; `None` uses the shared documents.
    pub scope: Option<String>,
}

impl PlannerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let backend = match (non_empty("POURPLAN_DATABASE_PATH"), non_empty("POURPLAN_DATA_DIR")) {
            (Some(path), _) => StoreBackend::Sqlite(PathBuf::from(path)),
            (None, Some(dir)) => StoreBackend::JsonFiles(PathBuf::from(dir)),
            (None, None) => StoreBackend::JsonFiles(default_data_dir()?),
        };

        let scope = match non_empty("POURPLAN_SCOPE") {
            Some(scope) => {
                let scope = scope.trim().to_string();
                if !is_valid_scope(&scope) {
                    return Err(ConfigError::InvalidValue("POURPLAN_SCOPE".to_string()));
                }
                Some(scope)
            }
            None => None,
        };

        Ok(PlannerConfig { backend, scope })
    }
}

/// Platform app data directory.
///
/// - **macOS**: `~/Library/Application Support/com.pourplan.planner`
/// - **Windows**: `%APPDATA%\pourplan\planner\data`
/// - **Linux**: `~/.local/share/planner`
fn default_data_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "pourplan", "planner")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoDataDirectory)
}

fn is_valid_scope(scope: &str) -> bool {
    scope.len() <= 64
        && scope
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory; set POURPLAN_DATA_DIR")]
    NoDataDirectory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<PlannerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PlannerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_database_path_selects_sqlite() {
        let config = config_from(&[
            ("POURPLAN_DATABASE_PATH", "/var/lib/pourplan.db"),
            ("POURPLAN_DATA_DIR", "/tmp/docs"),
        ])
        .unwrap();
        assert_eq!(
            config.backend,
            StoreBackend::Sqlite(PathBuf::from("/var/lib/pourplan.db"))
        );
        assert_eq!(config.scope, None);
    }

    #[test]
    fn test_data_dir_selects_json_files() {
        let config = config_from(&[("POURPLAN_DATA_DIR", "/tmp/docs")]).unwrap();
        assert_eq!(config.backend, StoreBackend::JsonFiles(PathBuf::from("/tmp/docs")));
    }

    #[test]
    fn test_blank_database_path_is_ignored() {
        let config = config_from(&[
            ("POURPLAN_DATABASE_PATH", "  "),
            ("POURPLAN_DATA_DIR", "/tmp/docs"),
        ])
        .unwrap();
        assert!(matches!(config.backend, StoreBackend::JsonFiles(_)));
    }

    #[test]
    fn test_scope() {
        let config = config_from(&[("POURPLAN_DATA_DIR", "/d"), ("POURPLAN_SCOPE", "user-7")]).unwrap();
        assert_eq!(config.scope.as_deref(), Some("user-7"));

        let err = config_from(&[("POURPLAN_DATA_DIR", "/d"), ("POURPLAN_SCOPE", "../x")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name) if name == "POURPLAN_SCOPE"));
    }
}
