//! Usage: Unit contract shared by every legacy import (outcome record, error taxonomy, trait).

use rusqlite::Connection;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a unit reports back to its caller. Errors never escape a unit any other way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub migrated: usize,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
}

impl Outcome {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    pub fn migrated(count: usize, backup_path: PathBuf) -> Self {
        Self {
            migrated: count,
            backup_path: Some(backup_path),
            ..Self::default()
        }
    }

    pub fn failed(error: &ImportError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("READ_ERROR: {0}")]
    Read(String),

    #[error("PARSE_ERROR: {0}")]
    Parse(#[from] serde_json::Error),

    /// Valid JSON, wrong structure for the typed record.
    #[error("SHAPE_ERROR: {0}")]
    Shape(String),

    #[error("DB_ERROR: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("BACKUP_ERROR: {0}")]
    Backup(String),

    #[error("REMOVE_ERROR: {0}")]
    Remove(String),
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::Read(_) => "READ_ERROR",
            ImportError::Parse(_) => "PARSE_ERROR",
            ImportError::Shape(_) => "SHAPE_ERROR",
            ImportError::Db(_) => "DB_ERROR",
            ImportError::Backup(_) => "BACKUP_ERROR",
            ImportError::Remove(_) => "REMOVE_ERROR",
        }
    }
}

/// One legacy JSON file imported into the store.
pub trait MigrationUnit {
    /// Stable identifier used in logs and status lines.
    fn name(&self) -> &'static str;

    fn source_file_name(&self) -> &'static str;

    fn migrate(&self, conn: &mut Connection, data_dir: &Path) -> Outcome;
}
