//! Storage for the proposer block cache.

mod exec;
mod instrumentation;
mod managers;
pub mod ops;

use async_trait::async_trait;
pub use managers::block_cache::BlockCacheManager;
use rewards_db_types::{CachedAddressInfo, DbResult};
use rewards_primitives::{Address, BlockRecord};

/// Async view of the block cache used by the sync engine.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait BlockCache: Send + Sync {
    async fn get_blocks(&self, address: &Address) -> DbResult<Option<Vec<BlockRecord>>>;

    async fn put_blocks(&self, address: &Address, blocks: Vec<BlockRecord>) -> DbResult<()>;

    async fn get_max_round(&self, address: &Address) -> DbResult<Option<u64>>;

    async fn clear_address(&self, address: &Address) -> DbResult<()>;

    async fn clear_all(&self) -> DbResult<()>;

    async fn list_addresses(&self) -> DbResult<Vec<CachedAddressInfo>>;
}
