//! Block cache manager.

use std::sync::Arc;

use async_trait::async_trait;
use rewards_db_types::{traits::BlockCacheDatabase, AddressCacheEntry, CachedAddressInfo, DbResult};
use rewards_primitives::{Address, BlockRecord};
use threadpool::ThreadPool;

use crate::{
    ops::block_cache::{BlockCacheOps, Context},
    BlockCache,
};

/// Async front for the per-address block cache.
///
/// Every call is dispatched onto the worker pool, so the manager can be shared freely between
/// tasks on an async runtime.
#[expect(missing_debug_implementations, reason = "ops handle is not Debug")]
pub struct BlockCacheManager {
    ops: BlockCacheOps,
}

impl BlockCacheManager {
    pub fn new(pool: ThreadPool, db: Arc<impl BlockCacheDatabase + 'static>) -> Self {
        let ops = Context::new(db).into_ops(pool);
        Self { ops }
    }

    pub async fn get_blocks_async(&self, address: &Address) -> DbResult<Option<Vec<BlockRecord>>> {
        self.ops.get_blocks_async(address.clone()).await
    }

    pub fn get_blocks_blocking(&self, address: &Address) -> DbResult<Option<Vec<BlockRecord>>> {
        self.ops.get_blocks_blocking(address.clone())
    }

    pub async fn get_entry_async(&self, address: &Address) -> DbResult<Option<AddressCacheEntry>> {
        self.ops.get_entry_async(address.clone()).await
    }

    pub async fn put_blocks_async(
        &self,
        address: &Address,
        blocks: Vec<BlockRecord>,
    ) -> DbResult<()> {
        self.ops.put_blocks_async(address.clone(), blocks).await
    }

    pub fn put_blocks_blocking(&self, address: &Address, blocks: Vec<BlockRecord>) -> DbResult<()> {
        self.ops.put_blocks_blocking(address.clone(), blocks)
    }

    pub async fn get_max_round_async(&self, address: &Address) -> DbResult<Option<u64>> {
        self.ops.get_max_round_async(address.clone()).await
    }

    pub async fn clear_address_async(&self, address: &Address) -> DbResult<()> {
        self.ops.clear_address_async(address.clone()).await
    }

    pub async fn clear_all_async(&self) -> DbResult<()> {
        self.ops.clear_all_async().await
    }

    pub async fn list_addresses_async(&self) -> DbResult<Vec<CachedAddressInfo>> {
        self.ops.list_addresses_async().await
    }

    pub fn list_addresses_blocking(&self) -> DbResult<Vec<CachedAddressInfo>> {
        self.ops.list_addresses_blocking()
    }
}

#[async_trait]
impl BlockCache for BlockCacheManager {
    async fn get_blocks(&self, address: &Address) -> DbResult<Option<Vec<BlockRecord>>> {
        self.get_blocks_async(address).await
    }

    async fn put_blocks(&self, address: &Address, blocks: Vec<BlockRecord>) -> DbResult<()> {
        self.put_blocks_async(address, blocks).await
    }

    async fn get_max_round(&self, address: &Address) -> DbResult<Option<u64>> {
        self.get_max_round_async(address).await
    }

    async fn clear_address(&self, address: &Address) -> DbResult<()> {
        self.clear_address_async(address).await
    }

    async fn clear_all(&self) -> DbResult<()> {
        self.clear_all_async().await
    }

    async fn list_addresses(&self) -> DbResult<Vec<CachedAddressInfo>> {
        self.list_addresses_async().await
    }
}
