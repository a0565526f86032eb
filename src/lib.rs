mod app;
mod domain;
mod infra;
mod shared;

pub(crate) use domain::legacy_import;
pub(crate) use infra::{config, db};

pub use app::logging::init as init_logging;
pub use app::runner::{default_units, run_units, UnitReport};
pub use config::MigrateConfig;
pub use db::{init as init_db, Db};
pub use legacy_import::{
    migrate_accounts, migrate_settings, AccountMigrator, AccountRow, ImportError, LegacyAccount,
    LegacySettings, MigrationUnit, Outcome, SettingsMigrator,
};

use std::process::ExitCode;

/// Cold-start pass: resolve config, open the store, run every unit once, report.
pub fn run() -> ExitCode {
    let config = MigrateConfig::from_env();
    let _log_guard = init_logging(config.log_dir.as_deref());

    tracing::info!(
        data_dir = %config.data_dir.display(),
        db_path = %config.db_path.display(),
        strict = config.strict,
        "开始检查旧版 JSON 数据"
    );

    if let Err(err) = config.ensure_data_dir() {
        tracing::error!("数据目录不可用: {}", err);
        return ExitCode::FAILURE;
    }

    let db = match init_db(&config.db_path) {
        Ok(db) => db,
        Err(err) => {
            tracing::error!("数据库初始化失败: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut conn = match db.open_connection() {
        Ok(conn) => conn,
        Err(err) => {
            tracing::error!("数据库连接失败: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let reports = run_units(&mut conn, &config.data_dir, &default_units());
    let failed = reports.iter().filter(|r| r.outcome.is_error()).count();
    let migrated: usize = reports.iter().map(|r| r.outcome.migrated).sum();

    tracing::info!(units = reports.len(), migrated, failed, "旧版数据检查完成");

    if failed > 0 && config.strict {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
