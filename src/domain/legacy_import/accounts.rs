//! Usage: Import `accounts.json` (array of legacy account objects) into the `accounts` table.

use super::pass::run_import;
use super::types::{ImportError, MigrationUnit, Outcome};
use crate::shared::time::now_iso8601_millis;
use rusqlite::{Connection, Transaction};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

pub const ACCOUNTS_FILE_NAME: &str = "accounts.json";
const UNIT_NAME: &str = "accounts";
pub const DEFAULT_ACCOUNT_NAME: &str = "未命名账号";
pub const DEFAULT_ACCOUNT_STATUS: &str = "active";

const INSERT_ACCOUNT_SQL: &str = r#"
INSERT INTO accounts (
  id, name, credentials, status, request_count, error_count,
  created_at, last_used_at, usage
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

/// One element of the legacy array. Anything not listed here is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAccount {
    pub id: String,
    pub name: Option<String>,
    pub credentials: Option<Value>,
    pub status: Option<String>,
    pub request_count: Option<u64>,
    pub error_count: Option<u64>,
    pub created_at: Option<String>,
    pub last_used_at: Option<String>,
    pub usage: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub credentials: String,
    pub status: String,
    pub request_count: i64,
    pub error_count: i64,
    pub created_at: String,
    pub last_used_at: Option<String>,
    pub usage: Option<String>,
}

// The legacy writer stored "" for unset strings.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// null, false, 0 and "" were all "unset" to the legacy writer. Empty objects/arrays were not.
fn present_payload(value: Option<Value>) -> Option<Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn count_column(id: &str, field: &str, value: Option<u64>) -> Result<i64, ImportError> {
    i64::try_from(value.unwrap_or(0))
        .map_err(|_| ImportError::Shape(format!("account {id}: {field} out of range")))
}

impl LegacyAccount {
    /// Fills legacy defaults. `now` is used for a missing `createdAt`.
    pub fn into_row(self, now: &str) -> Result<AccountRow, ImportError> {
        let request_count = count_column(&self.id, "requestCount", self.request_count)?;
        let error_count = count_column(&self.id, "errorCount", self.error_count)?;

        let credentials = match present_payload(self.credentials) {
            Some(value) => serde_json::to_string(&value)?,
            None => "{}".to_string(),
        };
        let usage = present_payload(self.usage)
            .map(|value| serde_json::to_string(&value))
            .transpose()?;

        Ok(AccountRow {
            id: self.id,
            name: non_empty(self.name).unwrap_or_else(|| DEFAULT_ACCOUNT_NAME.to_string()),
            credentials,
            status: non_empty(self.status).unwrap_or_else(|| DEFAULT_ACCOUNT_STATUS.to_string()),
            request_count,
            error_count,
            created_at: non_empty(self.created_at).unwrap_or_else(|| now.to_string()),
            last_used_at: non_empty(self.last_used_at),
            usage,
        })
    }
}

/// `Ok(None)` for anything that is not a non-empty array.
fn decode_accounts(bytes: &[u8]) -> Result<Option<Vec<LegacyAccount>>, ImportError> {
    let raw: Value = serde_json::from_slice(bytes)?;
    let items = match raw {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Ok(None),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            serde_json::from_value::<LegacyAccount>(item)
                .map_err(|e| ImportError::Shape(format!("{ACCOUNTS_FILE_NAME}[{idx}]: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn write_accounts(tx: &Transaction<'_>, bytes: &[u8]) -> Result<Option<usize>, ImportError> {
    let Some(accounts) = decode_accounts(bytes)? else {
        return Ok(None);
    };

    tracing::info!(count = accounts.len(), "开始迁移账号");

    let now = now_iso8601_millis();
    let mut stmt = tx.prepare(INSERT_ACCOUNT_SQL)?;
    let mut written = 0_usize;
    for account in accounts {
        let row = account.into_row(&now)?;
        stmt.execute(rusqlite::params![
            row.id,
            row.name,
            row.credentials,
            row.status,
            row.request_count,
            row.error_count,
            row.created_at,
            row.last_used_at,
            row.usage,
        ])?;
        written += 1;
    }

    Ok(Some(written))
}

pub fn migrate_accounts(conn: &mut Connection, data_dir: &Path) -> Outcome {
    run_import(conn, data_dir, UNIT_NAME, ACCOUNTS_FILE_NAME, write_accounts)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AccountMigrator;

impl MigrationUnit for AccountMigrator {
    fn name(&self) -> &'static str {
        UNIT_NAME
    }

    fn source_file_name(&self) -> &'static str {
        ACCOUNTS_FILE_NAME
    }

    fn migrate(&self, conn: &mut Connection, data_dir: &Path) -> Outcome {
        migrate_accounts(conn, data_dir)
    }
}
