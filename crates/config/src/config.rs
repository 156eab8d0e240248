use std::{
    fs,
    path::{Path, PathBuf},
};

use rewards_primitives::params::{
    DEFAULT_FRESH_TOLERANCE_ROUNDS, DEFAULT_PAGE_LIMIT, MAINNET_REWARDS_START_ROUND,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default value for `datadir` in [`Config`].
const DEFAULT_DATADIR: &str = "rewards-data";

/// Default value for `url` in [`IndexerConfig`].
const DEFAULT_INDEXER_URL: &str = "https://mainnet-idx.4160.nodely.dev";

/// Default request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Base URL of the indexer REST API.
    #[serde(default = "default_indexer_url")]
    pub url: String,

    /// Sent as `X-Indexer-API-Token` when set and non-empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// How many block headers to request per page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            url: default_indexer_url(),
            api_token: None,
            page_limit: default_page_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Round from which addresses without cache are fetched.
    #[serde(default = "default_chain_start_round")]
    pub chain_start_round: u64,

    /// Skip the indexer when the cache is within this many rounds of the tip.
    #[serde(default = "default_fresh_tolerance_rounds")]
    pub fresh_tolerance_rounds: u64,

    #[serde(default = "default_enable_cache")]
    pub enable_cache: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            chain_start_round: default_chain_start_round(),
            fresh_tolerance_rounds: default_fresh_tolerance_rounds(),
            enable_cache: default_enable_cache(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Use JSON format for logs instead of compact format.
    #[serde(default)]
    pub json: bool,

    /// Directory path for file-based logging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The data directory where database contents reside.
    #[serde(default = "default_datadir")]
    pub datadir: PathBuf,

    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datadir: default_datadir(),
            indexer: IndexerConfig::default(),
            sync: SyncConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

fn default_datadir() -> PathBuf {
    DEFAULT_DATADIR.into()
}

fn default_indexer_url() -> String {
    DEFAULT_INDEXER_URL.to_owned()
}

fn default_page_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_chain_start_round() -> u64 {
    MAINNET_REWARDS_START_ROUND
}

fn default_fresh_tolerance_rounds() -> u64 {
    DEFAULT_FRESH_TOLERANCE_ROUNDS
}

fn default_enable_cache() -> bool {
    true
}
