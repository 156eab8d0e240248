//! Sled store for the proposer block cache.

pub mod block_cache;
mod init;
pub mod macros;

use std::{path::Path, sync::Arc};

pub use block_cache::db::BlockCacheDBSled;

pub use crate::init::{init_sled_db, open_sled_database, SCHEMA_VERSION};

pub const SLED_NAME: &str = "block-cache";

/// Opens the block cache database under `datadir`.
pub fn open_block_cache(datadir: &Path) -> anyhow::Result<Arc<BlockCacheDBSled>> {
    let sled_db = open_sled_database(datadir, SLED_NAME)?;
    BlockCacheDBSled::new(sled_db)
        .map_err(|e| anyhow::anyhow!("Failed to initialize block cache: {}", e))
        .map(Arc::new)
}
