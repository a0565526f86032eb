//! Usage: Ordered runner over legacy import units (one status line per unit).

use crate::legacy_import::{AccountMigrator, MigrationUnit, Outcome, SettingsMigrator};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitReport {
    pub unit: &'static str,
    pub source_file: &'static str,
    pub outcome: Outcome,
}

impl UnitReport {
    pub fn status_line(&self) -> String {
        let outcome = &self.outcome;
        if let Some(err) = outcome.error.as_deref() {
            return format!("{}: failed: {err}", self.unit);
        }
        if outcome.skipped {
            return format!("{}: nothing to import from {}", self.unit, self.source_file);
        }
        match outcome.backup_path.as_deref() {
            Some(backup) => format!(
                "{}: migrated {} (backup: {})",
                self.unit,
                outcome.migrated,
                backup.display()
            ),
            None => format!("{}: migrated {}", self.unit, outcome.migrated),
        }
    }
}

pub fn default_units() -> Vec<Box<dyn MigrationUnit>> {
    vec![Box::new(AccountMigrator), Box::new(SettingsMigrator)]
}

/// Runs every unit in order. A failing unit never stops the ones after it.
pub fn run_units(
    conn: &mut Connection,
    data_dir: &Path,
    units: &[Box<dyn MigrationUnit>],
) -> Vec<UnitReport> {
    let mut reports = Vec::with_capacity(units.len());
    for unit in units {
        let outcome = unit.migrate(conn, data_dir);
        let report = UnitReport {
            unit: unit.name(),
            source_file: unit.source_file_name(),
            outcome,
        };

        if report.outcome.is_error() {
            tracing::warn!(unit = report.unit, "{}", report.status_line());
        } else {
            tracing::info!(unit = report.unit, "{}", report.status_line());
        }
        reports.push(report);
    }
    reports
}
