//! Usage: Resolve runtime configuration (data dir, db path, log dir, failure policy) from env vars.

use crate::db::DB_FILE_NAME;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "STORE_MIGRATE_DATA_DIR";
pub const DB_PATH_ENV: &str = "STORE_MIGRATE_DB_PATH";
pub const LOG_DIR_ENV: &str = "STORE_MIGRATE_LOG_DIR";
pub const STRICT_ENV: &str = "STORE_MIGRATE_STRICT";
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrateConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: Option<PathBuf>,
    /// Any unit error turns into a non-zero exit code.
    pub strict: bool,
}

impl MigrateConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_dir = read(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let db_path = read(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        let strict = read(STRICT_ENV)
            .map(|v| v.to_ascii_lowercase())
            .is_some_and(|v| v == "1" || v == "true" || v == "yes");

        Self {
            data_dir,
            db_path,
            log_dir,
            strict,
        }
    }

    pub fn ensure_data_dir(&self) -> Result<(), String> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            format!(
                "CONFIG_ERROR: failed to create data dir {}: {e}",
                self.data_dir.display()
            )
        })
    }
}
