//! Usage: Small filesystem helpers for legacy source files (optional reads, backups, removal).

use sha2::{Digest, Sha256};
use std::io;
use std::path::{Path, PathBuf};

pub(crate) fn read_optional_file(path: &Path) -> Result<Option<Vec<u8>>, String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(format!("failed to read {}: {err}", path.display())),
    }
}

/// `<dir>/<file_name>.backup.<millis>` next to the source file.
pub(crate) fn backup_path_for(source: &Path, unix_millis: i64) -> PathBuf {
    let file_name = source
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("source");
    source.with_file_name(format!("{file_name}.backup.{unix_millis}"))
}

const MAX_BACKUP_SUFFIX_PROBES: i64 = 1000;

/// Copies `source` to a timestamped sibling. An existing backup is never overwritten: a taken
/// suffix is bumped by one millisecond until a free name is found.
pub(crate) fn backup_file(source: &Path, unix_millis: i64) -> Result<PathBuf, String> {
    let backup_path = (0..MAX_BACKUP_SUFFIX_PROBES)
        .map(|offset| backup_path_for(source, unix_millis.saturating_add(offset)))
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| {
            format!(
                "no free backup name for {} near suffix {unix_millis}",
                source.display()
            )
        })?;

    std::fs::copy(source, &backup_path).map_err(|e| {
        format!(
            "failed to copy {} -> {}: {e}",
            source.display(),
            backup_path.display()
        )
    })?;
    Ok(backup_path)
}

/// Lowercase hex sha256, logged with each import so a backup can be matched to its run.
pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub(crate) fn remove_file_if_exists(path: &Path) -> Result<bool, String> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(format!("failed to remove {}: {err}", path.display())),
    }
}
