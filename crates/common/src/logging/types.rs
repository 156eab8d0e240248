//! Configuration types for the logging subsystem.

use std::path::PathBuf;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::format::FmtSpan;

/// Output encoding shared by every layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Where rotated log files go.
#[derive(Debug, Clone)]
pub struct LogFileTarget {
    pub directory: PathBuf,
    /// Rotated files are named `<prefix>.<date>`.
    pub file_name_prefix: String,
    pub rotation: Rotation,
}

impl LogFileTarget {
    /// Daily rotated files under `directory`.
    pub fn daily(directory: impl Into<PathBuf>, file_name_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name_prefix: file_name_prefix.into(),
            rotation: Rotation::DAILY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Reported once logging is up.
    pub service_name: String,
    pub format: LogFormat,
    pub span_events: FmtSpan,
    pub file: Option<LogFileTarget>,
}

impl LoggerConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            format: LogFormat::Compact,
            span_events: FmtSpan::NONE,
            file: None,
        }
    }

    pub fn json(mut self, enabled: bool) -> Self {
        self.format = if enabled {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };
        self
    }

    pub fn with_file(mut self, target: LogFileTarget) -> Self {
        self.file = Some(target);
        self
    }

    pub fn with_span_events(mut self, span_events: FmtSpan) -> Self {
        self.span_events = span_events;
        self
    }
}
