//! Subscriber setup for applications that do not install their own.
//!
//! Library code only emits `tracing` events; nothing is printed until a
//! subscriber is installed. [`init_tracing`] installs a `tracing-subscriber`
//! fmt subscriber, optionally writing to a daily rolling file through
//! `tracing-appender`.

use crate::error::NetError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracingConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub level: String,
    pub format: OutputFormat,
    /// Write to `<log_dir>/<file_prefix>.YYYY-MM-DD` instead of stdout
    pub log_dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: "info,common_net=debug".to_string(),
            format: OutputFormat::default(),
            log_dir: None,
            file_prefix: "common-net.log".to_string(),
        }
    }
}

impl TracingConfig {
    pub fn builder() -> TracingConfigBuilder {
        TracingConfigBuilder::default()
    }

    /// Verbose console output for local debugging.
    pub fn debug() -> Self {
        Self {
            level: "debug,common_net=trace".to_string(),
            format: OutputFormat::Pretty,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TracingConfigBuilder {
    config: TracingConfig,
}

impl TracingConfigBuilder {
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.config.format = format;
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = Some(dir.into());
        self
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.file_prefix = prefix.into();
        self
    }

    pub fn build(self) -> TracingConfig {
        self.config
    }
}

/// Install the global subscriber.
///
/// Returns the appender guard when logging to a file; keep it alive for as
/// long as logs should be flushed. Fails if a global subscriber is already set
/// or the filter directive is invalid.
pub fn init_tracing(config: &TracingConfig) -> Result<Option<WorkerGuard>, NetError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            NetError::ConfigurationError(format!("invalid log filter '{}': {e}", config.level))
        })?,
    };

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, &config.file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.log_dir.is_none())
        .with_target(true);
    let result = match config.format {
        OutputFormat::Compact => builder.compact().try_init(),
        OutputFormat::Pretty => builder.pretty().try_init(),
        OutputFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| NetError::ConfigurationError(format!("failed to install subscriber: {e}")))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = TracingConfig::builder()
            .level("warn")
            .format(OutputFormat::Json)
            .log_dir("/tmp/logs")
            .build();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.file_prefix, "common-net.log");
    }

    #[test]
    fn format_deserializes_lowercase() {
        let config: TracingConfig = serde_json::from_str(
            r#"{"level": "info", "format": "pretty", "log_dir": null, "file_prefix": "app"}"#,
        )
        .unwrap();
        assert_eq!(config.format, OutputFormat::Pretty);
    }
}
