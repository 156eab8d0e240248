//! Logging subsystem built on `tracing-subscriber`.

mod manager;
mod types;


pub use manager::{build_filter, init};
pub use tracing_appender::rolling::Rotation;
pub use types::{LogFileTarget, LogFormat, LoggerConfig};
