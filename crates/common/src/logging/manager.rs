//! Subscriber setup.

use std::io;

use tracing::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    fmt::{layer, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use super::types::{LogFormat, LoggerConfig};

/// Filter defaulting to INFO, overridable through `RUST_LOG`.
pub fn build_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy()
}

fn fmt_layer<S, W>(
    config: &LoggerConfig,
    writer: W,
    ansi: bool,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_span_events(config.span_events.clone());
    match config.format {
        LogFormat::Json => base.json().with_filter(build_filter()).boxed(),
        LogFormat::Compact => base.compact().with_filter(build_filter()).boxed(),
    }
}

/// Installs the global subscriber: stdout, plus rotated files when a target is configured.
///
/// Only the first call in a process takes effect.
pub fn init(config: LoggerConfig) {
    let stdout = fmt_layer(&config, io::stdout, true);
    let file = config.file.as_ref().map(|target| {
        let appender = RollingFileAppender::new(
            target.rotation.clone(),
            &target.directory,
            &target.file_name_prefix,
        );
        fmt_layer(&config, appender, false)
    });

    if tracing_subscriber::registry()
        .with(stdout)
        .with(file)
        .try_init()
        .is_err()
    {
        return;
    }

    info!(service_name = %config.service_name, format = ?config.format, "logging initialized");
    if let Some(target) = &config.file {
        info!(
            log_dir = %target.directory.display(),
            log_prefix = %target.file_name_prefix,
            "file logging enabled"
        );
    }
}
