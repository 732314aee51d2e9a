use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::StartupError;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. When a log
/// directory is configured, output is also written to daily rolling files;
/// the returned guard must be held until shutdown to flush them.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>, StartupError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| StartupError::Logging(format!("invalid filter {:?}: {e}", config.filter)))?,
    };

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "jukey.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| StartupError::Logging(e.to_string()))?;

    Ok(guard)
}
