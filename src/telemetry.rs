//! Tracing subscriber setup

use crate::SkycastError;
use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber from the logging configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Called once by the
/// embedding shell; a second call fails with a configuration error.
pub fn init(config: &LoggingConfig) -> Result<(), SkycastError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| SkycastError::config(format!("Invalid log filter: {e}")))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };

    installed.map_err(|e| SkycastError::config(format!("Failed to install subscriber: {e}")))
}
