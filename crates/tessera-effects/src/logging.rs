//! Tracing subscriber setup

use tessera_core::{LoggingConfig, TesseraError};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by `config.filter`.
///
/// `RUST_LOG` takes precedence over the configured filter when set. Returns
/// `Ok(false)` if a global subscriber was already installed, which is the
/// normal case when several tests share a process.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool, TesseraError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            TesseraError::config(format!("Invalid log filter '{}': {e}", config.filter))
        })?,
    };

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.ansi)
        .with_target(true)
        .try_init()
        .is_ok())
}
