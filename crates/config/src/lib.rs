//! Configuration for the rewards tooling.

mod config;

pub use config::{Config, ConfigError, IndexerConfig, LoggingConfig, SyncConfig};
