//! Usage: Import `settings.json` (admin key + api keys) into the `settings` / `api_keys` tables.

use super::pass::run_import;
use super::types::{ImportError, MigrationUnit, Outcome};
use rusqlite::{Connection, Transaction};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

pub const SETTINGS_FILE_NAME: &str = "settings.json";
const UNIT_NAME: &str = "settings";
const SETTINGS_ROW_ID: i64 = 1;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySettings {
    pub admin_key: Option<String>,
    /// Only a JSON array is imported; any other value is ignored.
    pub api_keys: Option<Value>,
}

impl LegacySettings {
    fn admin_key(&self) -> Option<&str> {
        self.admin_key.as_deref().filter(|v| !v.is_empty())
    }

    fn api_keys(&self) -> Result<Vec<&str>, ImportError> {
        let Some(Value::Array(items)) = &self.api_keys else {
            return Ok(Vec::new());
        };

        items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                item.as_str().ok_or_else(|| {
                    ImportError::Shape(format!(
                        "{SETTINGS_FILE_NAME}: apiKeys[{idx}] must be a string"
                    ))
                })
            })
            .collect()
    }
}

fn decode_settings(bytes: &[u8]) -> Result<LegacySettings, ImportError> {
    let raw: Value = serde_json::from_slice(bytes)?;
    if !raw.is_object() {
        return Err(ImportError::Shape(format!(
            "{SETTINGS_FILE_NAME}: expected a JSON object"
        )));
    }
    serde_json::from_value(raw)
        .map_err(|e| ImportError::Shape(format!("{SETTINGS_FILE_NAME}: {e}")))
}

fn write_settings(tx: &Transaction<'_>, bytes: &[u8]) -> Result<Option<usize>, ImportError> {
    let settings = decode_settings(bytes)?;
    let api_keys = settings.api_keys()?;

    tracing::info!(
        has_admin_key = settings.admin_key().is_some(),
        api_keys = api_keys.len(),
        "开始迁移系统设置"
    );

    if let Some(admin_key) = settings.admin_key() {
        tx.execute(
            r#"
INSERT INTO settings (id, admin_key)
VALUES (?1, ?2)
ON CONFLICT(id) DO UPDATE SET admin_key = excluded.admin_key
"#,
            (SETTINGS_ROW_ID, admin_key),
        )?;
    }

    if !api_keys.is_empty() {
        let mut stmt = tx.prepare("INSERT OR IGNORE INTO api_keys (key) VALUES (?1)")?;
        for key in api_keys {
            stmt.execute([key])?;
        }
    }

    // The whole settings blob counts as one record.
    Ok(Some(1))
}

pub fn migrate_settings(conn: &mut Connection, data_dir: &Path) -> Outcome {
    run_import(conn, data_dir, UNIT_NAME, SETTINGS_FILE_NAME, write_settings)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsMigrator;

impl MigrationUnit for SettingsMigrator {
    fn name(&self) -> &'static str {
        UNIT_NAME
    }

    fn source_file_name(&self) -> &'static str {
        SETTINGS_FILE_NAME
    }

    fn migrate(&self, conn: &mut Connection, data_dir: &Path) -> Outcome {
        migrate_settings(conn, data_dir)
    }
}
