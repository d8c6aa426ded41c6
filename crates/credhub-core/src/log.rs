//! Logging system for the CredHub client.
//!
//! Events are written to stderr so that stdout carries nothing but the
//! rendered command output.

use credhub_types::{CredhubError, LogConfig, LogFormat, LogLevel, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging from configuration.
///
/// `RUST_LOG` takes precedence over the configured level; `debug` forces
/// debug output regardless of either.
pub fn init(config: &LogConfig, debug: bool) -> Result<()> {
    let filter = build_filter(config.level, debug);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| CredhubError::Other(format!("Failed to initialize logging: {}", e)))
}

fn build_filter(level: LogLevel, debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new(LogLevel::Debug.as_filter());
    }

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // The only test in this crate that touches RUST_LOG.
    #[test]
    fn test_filter_precedence() {
        std::env::set_var("RUST_LOG", "info");
        assert_eq!(build_filter(LogLevel::Error, true).to_string(), "debug");
        assert_eq!(build_filter(LogLevel::Error, false).to_string(), "info");

        std::env::remove_var("RUST_LOG");
        assert_eq!(build_filter(LogLevel::Error, false).to_string(), "error");
        assert_eq!(build_filter(LogLevel::None, true).to_string(), "debug");
    }
}
