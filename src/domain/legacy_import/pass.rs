//! Usage: Shared import pass: detect -> parse/write in one transaction -> backup -> delete -> report.

use super::types::{ImportError, Outcome};
use crate::shared::fs::{backup_file, read_optional_file, remove_file_if_exists, sha256_hex};
use crate::shared::time::now_unix_millis;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};

/// Runs one unit end to end. `write` returns `Ok(None)` when the source holds nothing to import;
/// the file is then left in place.
pub(super) fn run_import<F>(
    conn: &mut Connection,
    data_dir: &Path,
    unit: &'static str,
    file_name: &str,
    write: F,
) -> Outcome
where
    F: FnOnce(&Transaction<'_>, &[u8]) -> Result<Option<usize>, ImportError>,
{
    let source_path = data_dir.join(file_name);

    let bytes = match read_optional_file(&source_path) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::info!(unit, path = %source_path.display(), "未找到旧版数据文件，跳过迁移");
            return Outcome::skipped();
        }
        Err(err) => return fail(unit, ImportError::Read(err)),
    };

    match import_bytes(conn, unit, &source_path, &bytes, write) {
        Ok(outcome) => outcome,
        Err(err) => fail(unit, err),
    }
}

fn fail(unit: &'static str, err: ImportError) -> Outcome {
    tracing::error!(unit, error_code = err.code(), "旧版数据迁移失败: {}", err);
    Outcome::failed(&err)
}

fn import_bytes<F>(
    conn: &mut Connection,
    unit: &'static str,
    source_path: &Path,
    bytes: &[u8],
    write: F,
) -> Result<Outcome, ImportError>
where
    F: FnOnce(&Transaction<'_>, &[u8]) -> Result<Option<usize>, ImportError>,
{
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let migrated = match write(&tx, bytes)? {
        Some(count) => count,
        None => {
            tracing::info!(unit, path = %source_path.display(), "旧版数据文件为空，跳过迁移");
            return Ok(Outcome::skipped());
        }
    };

    tx.commit()?;
    tracing::info!(
        unit,
        migrated,
        source_sha256 = %sha256_hex(bytes),
        "已写入数据库"
    );

    let backup_path = retire_source(unit, source_path)?;
    Ok(Outcome::migrated(migrated, backup_path))
}

/// Backup first; the source is only removed once a copy exists.
fn retire_source(unit: &'static str, source_path: &Path) -> Result<PathBuf, ImportError> {
    let backup_path =
        backup_file(source_path, now_unix_millis()).map_err(ImportError::Backup)?;
    tracing::info!(unit, backup = %backup_path.display(), "已备份原文件");

    remove_file_if_exists(source_path).map_err(ImportError::Remove)?;
    tracing::info!(unit, path = %source_path.display(), "已删除原文件，防止重复迁移");

    Ok(backup_path)
}
