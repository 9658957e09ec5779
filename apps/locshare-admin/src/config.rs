//! Store configuration for the admin CLI.
//!
//! Settings come from flags or environment variables:
//!
//! ```bash
//! DATABASE_URL=sqlite:///var/lib/locshare/store.db   # preferred
//! LOCSHARE_DB_PATH=/var/lib/locshare/store.db        # plain path form
//! LOCSHARE_DB_MAX_CONNECTIONS=4                      # pool size (default 1)
//! ```
//!
//! With neither set, the store lives at `~/.locshare/store.db`.

use locshare_storage::StoreError;
use locshare_store_sqlite::SqliteStore;
use thiserror::Error;

/// Where and how to open the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// `None` selects the per-user default database
    pub url: Option<String>,
    pub max_connections: u32,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported database URL: {0}. Only sqlite: URLs are supported")]
    UnsupportedDatabase(String),

    #[error("Invalid connection count: {0}. Expected a positive integer")]
    InvalidMaxConnections(String),

    #[error("In-memory databases cannot use more than one connection")]
    InMemoryPoolTooLarge,
}

impl StoreConfig {
    /// Build the configuration from the raw flag/env values.
    pub fn from_args(
        database_url: Option<&str>,
        legacy_db_path: Option<&str>,
        max_connections: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let url = match (database_url, legacy_db_path) {
            (Some(url), _) => Some(url.to_string()),
            (None, Some(path)) if path.starts_with("sqlite:") => Some(path.to_string()),
            (None, Some(path)) => Some(format!("sqlite://{}", path)),
            (None, None) => None,
        };

        if let Some(url) = &url {
            if !url.starts_with("sqlite:") {
                return Err(ConfigError::UnsupportedDatabase(url.clone()));
            }
        }

        let max_connections = match max_connections {
            None => 1,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxConnections(raw.to_string())),
            },
        };

        if max_connections > 1 && url.as_deref().is_some_and(|u| u.contains(":memory:")) {
            return Err(ConfigError::InMemoryPoolTooLarge);
        }

        Ok(Self {
            url,
            max_connections,
        })
    }

    pub async fn open(&self) -> Result<SqliteStore, StoreError> {
        match &self.url {
            Some(url) => SqliteStore::open_with_max_connections(url, self.max_connections).await,
            None => SqliteStore::open_default().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_wins_over_legacy_path() {
        let config =
            StoreConfig::from_args(Some("sqlite://a.db"), Some("/tmp/b.db"), None).unwrap();
        assert_eq!(config.url.as_deref(), Some("sqlite://a.db"));
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn legacy_path_becomes_sqlite_url() {
        let config = StoreConfig::from_args(None, Some("/tmp/b.db"), None).unwrap();
        assert_eq!(config.url.as_deref(), Some("sqlite:///tmp/b.db"));

        let config = StoreConfig::from_args(None, Some("sqlite::memory:"), None).unwrap();
        assert_eq!(config.url.as_deref(), Some("sqlite::memory:"));
    }

    #[test]
    fn nothing_set_selects_default_store() {
        let config = StoreConfig::from_args(None, None, None).unwrap();
        assert!(config.url.is_none());
    }

    #[test]
    fn non_sqlite_url_is_rejected() {
        let err = StoreConfig::from_args(Some("postgres://localhost/db"), None, None).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDatabase(_)));
    }

    #[test]
    fn max_connections_must_be_positive() {
        let config = StoreConfig::from_args(Some("sqlite://a.db"), None, Some(" 4 ")).unwrap();
        assert_eq!(config.max_connections, 4);

        for raw in ["0", "-1", "lots"] {
            let err = StoreConfig::from_args(Some("sqlite://a.db"), None, Some(raw)).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidMaxConnections(_)));
        }
    }

    #[test]
    fn in_memory_store_stays_on_one_connection() {
        let err =
            StoreConfig::from_args(Some("sqlite::memory:"), None, Some("2")).unwrap_err();
        assert!(matches!(err, ConfigError::InMemoryPoolTooLarge));
    }

    #[tokio::test]
    async fn open_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admin.db");
        let config =
            StoreConfig::from_args(None, Some(path.to_str().unwrap()), Some("2")).unwrap();

        config.open().await.unwrap();
        assert!(path.exists());
    }
}
