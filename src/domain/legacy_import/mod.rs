//! Usage: One-time import of legacy flat JSON state (accounts, settings) into SQLite.
//!
//! Each unit is self-contained: a missing source file is the steady state after a successful
//! import, and every failure is reported through [`Outcome`] instead of being returned as `Err`.

mod accounts;
mod pass;
mod settings;
mod types;

pub use accounts::{
    migrate_accounts, AccountMigrator, AccountRow, LegacyAccount, ACCOUNTS_FILE_NAME,
    DEFAULT_ACCOUNT_NAME, DEFAULT_ACCOUNT_STATUS,
};
pub use settings::{migrate_settings, LegacySettings, SettingsMigrator, SETTINGS_FILE_NAME};
pub use types::{ImportError, MigrationUnit, Outcome};
