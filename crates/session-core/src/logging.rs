//! Logging setup for applications embedding the negotiation core
//!
//! The library itself only emits `tracing` events. Applications that have no
//! subscriber of their own can install one with [`setup_logging`]; `RUST_LOG`
//! directives are honoured on top of the configured level.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::{NegotiationError, Result};

/// How [`setup_logging`] formats negotiation logs
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    /// One JSON object per event, for log shippers
    pub json: bool,
    /// Source file and line on every event
    pub file_info: bool,
    /// Log span entry and exit
    pub log_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: Level::INFO,
            json: false,
            file_info: false,
            log_spans: false,
        }
    }
}

impl LoggingConfig {
    /// Plain-text logging at a level given as text, e.g. from a command line flag
    pub fn from_level_str(level: &str) -> Result<Self> {
        Ok(LoggingConfig {
            level: parse_log_level(level)?,
            ..Default::default()
        })
    }
}

/// Install a global `tracing` subscriber
///
/// Fails with a configuration error when a global subscriber is already set.
pub fn setup_logging(config: LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::from_default_env().add_directive(LevelFilter::from_level(config.level).into());

    let span_events = if config.log_spans {
        FmtSpan::ACTIVE
    } else {
        FmtSpan::NONE
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_file(config.file_info)
        .with_line_number(config.file_info);

    let installed = if config.json {
        subscriber.with_writer(std::io::stdout).json().try_init()
    } else {
        subscriber.try_init()
    };
    installed.map_err(|e| {
        NegotiationError::configuration(format!("failed to install logging: {}", e))
    })?;

    tracing::debug!(
        "rtcpeer-session-core v{} logging at {}",
        env!("CARGO_PKG_VERSION"),
        config.level
    );
    Ok(())
}

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level)
        .map_err(|_| NegotiationError::configuration(format!("Invalid log level: {}", level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert!(matches!(
            parse_log_level("chatty"),
            Err(NegotiationError::Configuration { .. })
        ));
    }

    #[test]
    fn test_config_from_level_str() {
        let config = LoggingConfig::from_level_str("trace").unwrap();
        assert_eq!(config.level, Level::TRACE);
        assert!(!config.json);
        assert!(!config.file_info);
        assert!(!config.log_spans);

        assert!(LoggingConfig::from_level_str("").is_err());
    }
}
