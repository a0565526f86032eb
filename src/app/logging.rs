//! Usage: Tracing setup (stdout + optional plain log file, `RUST_LOG` filter, `log` bridge).

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE_NAME: &str = "store-migrate.log";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Keep the returned guard alive until exit so the file
/// writer flushes. Rotation is left to whatever supervises the process.
pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let _ = tracing_log::LogTracer::init();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stdout_layer = fmt::layer().with_target(false).compact();

    let (file_layer, guard) = match log_dir.map(open_log_dir) {
        Some(Ok(dir)) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Some(Err(err)) => {
            eprintln!("log dir unavailable, logging to stdout only: {err}");
            (None, None)
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return None;
    }

    tracing::debug!("tracing initialized");
    guard
}

fn open_log_dir(dir: &Path) -> Result<&Path, String> {
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("failed to create log dir {}: {e}", dir.display()))?;
    Ok(dir)
}
