use std::{fs::OpenOptions, sync::Arc};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Sends logs to `config.log_file`; the terminal belongs to the UI.
///
/// `RUST_LOG` wins over `log_level` when set.
pub fn init(config: &AppConfig) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fintrack={level},engine={level}",
            level = config.log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
