//! Config loading and wiring of the indexer client, cache and sync engine.

use std::sync::Arc;

use anyhow::{Context, Result};
use rewards_common::logging::{self, LogFileTarget, LoggerConfig};
use rewards_config::Config;
use rewards_db_store_sled::open_block_cache;
use rewards_indexer_client::{HttpIndexerClient, HttpIndexerConfig};
use rewards_storage::BlockCacheManager;
use rewards_sync::{BlockSync, SyncParams};
use threadpool::ThreadPool;
use tracing::*;

use crate::cli::Cli;

const POOL_THREADS: usize = 4;

pub(crate) type ToolSync = BlockSync<HttpIndexerClient, BlockCacheManager>;

/// Reads the config file if one was given and applies command line overrides.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).context("failed to load configuration")?,
        None => Config::default(),
    };
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(datadir) = &cli.datadir {
        config.datadir = datadir.clone();
    }
    if let Some(url) = &cli.indexer_url {
        config.indexer.url = url.clone();
    }
}

pub(crate) fn init_logging(config: &Config) {
    let mut lconfig = LoggerConfig::new("rewards-tool").json(config.logging.json);
    if let Some(dir) = &config.logging.log_dir {
        lconfig = lconfig.with_file(LogFileTarget::daily(dir.clone(), "rewards-tool"));
    }
    logging::init(lconfig);
}

fn sync_params(config: &Config) -> SyncParams {
    SyncParams {
        chain_start_round: config.sync.chain_start_round,
        fresh_tolerance_rounds: config.sync.fresh_tolerance_rounds,
        page_limit: config.indexer.page_limit,
    }
}

/// Everything a command needs, built once per invocation.
pub(crate) struct ToolContext {
    sync: ToolSync,
    enable_cache: bool,
}

impl ToolContext {
    pub(crate) fn new(config: &Config) -> Result<Self> {
        let db = open_block_cache(&config.datadir).with_context(|| {
            format!(
                "failed to open block cache in {}",
                config.datadir.display()
            )
        })?;
        let pool = ThreadPool::with_name("rewards-pool".to_owned(), POOL_THREADS);
        let cache = Arc::new(BlockCacheManager::new(pool, db));

        let client = HttpIndexerClient::new(&HttpIndexerConfig {
            url: config.indexer.url.clone(),
            api_token: config.indexer.api_token.clone(),
            timeout_secs: Some(config.indexer.request_timeout_secs),
        })
        .context("failed to build indexer client")?;

        debug!(
            datadir = %config.datadir.display(),
            indexer = %client.base_url(),
            "tool context ready"
        );

        Ok(Self {
            sync: BlockSync::new(Arc::new(client), cache, sync_params(config)),
            enable_cache: config.sync.enable_cache,
        })
    }

    pub(crate) fn sync(&self) -> &ToolSync {
        &self.sync
    }

    pub(crate) fn enable_cache(&self) -> bool {
        self.enable_cache
    }
}
