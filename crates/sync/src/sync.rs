use std::{collections::HashSet, sync::Arc};

use futures::future::join_all;
use rewards_db_types::CachedAddressInfo;
use rewards_indexer_client::{fetch_proposed_blocks, FetchRequest, IndexerClient, ProgressObserver};
use rewards_primitives::{sort_and_dedup_by_round, Address, BlockRecord};
use rewards_storage::BlockCache;
use tracing::*;

use crate::{
    error::SyncError,
    merge::{combine, dedup_addresses, merge_for_address, FetchPlan},
    params::{SyncOptions, SyncOutcome, SyncParams},
};

/// Fetches proposed blocks for sets of addresses, reusing and maintaining the block cache.
///
/// Holds no per-sync state; concurrent calls only share the cache, and each call works on what
/// it read at its start.
#[derive(Debug)]
pub struct BlockSync<C, S> {
    client: Arc<C>,
    cache: Arc<S>,
    params: SyncParams,
}

impl<C, S> BlockSync<C, S>
where
    C: IndexerClient,
    S: BlockCache,
{
    pub fn new(client: Arc<C>, cache: Arc<S>, params: SyncParams) -> Self {
        Self {
            client,
            cache,
            params,
        }
    }

    pub fn params(&self) -> &SyncParams {
        &self.params
    }

    /// Asks the indexer for the chain tip. Failures are logged and yield `None`, the tip is
    /// only a hint.
    pub async fn current_round_hint(&self) -> Option<u64> {
        match self.client.current_round().await {
            Ok(round) => Some(round),
            Err(err) => {
                warn!(%err, "could not fetch current round");
                None
            }
        }
    }

    /// Returns every block proposed by any of `addresses`, sorted and unique by round.
    ///
    /// With the cache enabled, only rounds past the highest cached round are fetched for the
    /// whole set, plus a bounded catch-up range for addresses whose cache lags behind the
    /// others. Merged lists are written back per address. A failed cache read makes that
    /// address start from scratch; a failed write is reported in the outcome.
    pub async fn fetch_blocks_with_cache(
        &self,
        addresses: &[Address],
        options: SyncOptions,
        observer: &dyn ProgressObserver,
    ) -> Result<SyncOutcome, SyncError> {
        let addresses = dedup_addresses(addresses);
        if addresses.is_empty() {
            return Ok(SyncOutcome {
                start_round: self.params.chain_start_round,
                ..Default::default()
            });
        }

        if !options.enable_cache {
            return self.fetch_uncached(&addresses, options, observer).await;
        }

        let cached = self.read_cached(&addresses).await;
        let plan = FetchPlan::new(&cached, self.params.chain_start_round);
        let short_circuited =
            plan.is_fresh(options.current_round, self.params.fresh_tolerance_rounds);
        debug!(
            addresses = addresses.len(),
            min_start_round = plan.min_start_round,
            lagging = plan.catch_up.as_ref().map_or(0, |c| c.addresses.len()),
            short_circuited,
            "planned sync"
        );

        let mut fetched = Vec::new();
        let mut did_fetch = false;

        if let Some(catch_up) = &plan.catch_up {
            let request = FetchRequest {
                proposers: catch_up.addresses.clone(),
                min_round: catch_up.start_round,
                max_round: Some(catch_up.end_round),
                current_round: options.current_round,
                page_limit: self.params.page_limit,
            };
            fetched.extend(fetch_proposed_blocks(self.client.as_ref(), &request, observer).await?);
            did_fetch = true;
        }

        if !short_circuited {
            let request = FetchRequest {
                proposers: addresses.clone(),
                min_round: plan.min_start_round,
                max_round: None,
                current_round: options.current_round,
                page_limit: self.params.page_limit,
            };
            fetched.extend(fetch_proposed_blocks(self.client.as_ref(), &request, observer).await?);
            did_fetch = true;
        }

        let cached_rounds: HashSet<u64> = cached
            .iter()
            .flat_map(|(_, blocks)| blocks.iter().map(|b| b.round))
            .collect();

        let merged: Vec<(Address, Vec<BlockRecord>)> = cached
            .into_iter()
            .map(|(address, blocks)| {
                let list = merge_for_address(&address, blocks, &fetched);
                (address, list)
            })
            .collect();

        let cache_write_failures = if did_fetch {
            self.write_merged(&merged).await
        } else {
            Vec::new()
        };

        let blocks = combine(merged.iter().map(|(_, list)| list));
        let cached_count = blocks
            .iter()
            .filter(|b| cached_rounds.contains(&b.round))
            .count();
        let fetched_count = blocks.len() - cached_count;

        info!(
            addresses = addresses.len(),
            blocks = blocks.len(),
            fetched_count,
            cached_count,
            start_round = plan.min_start_round,
            short_circuited,
            "synced proposed blocks"
        );

        Ok(SyncOutcome {
            blocks,
            start_round: plan.min_start_round,
            fetched_count,
            cached_count,
            short_circuited,
            cache_write_failures,
        })
    }

    async fn fetch_uncached(
        &self,
        addresses: &[Address],
        options: SyncOptions,
        observer: &dyn ProgressObserver,
    ) -> Result<SyncOutcome, SyncError> {
        let request = FetchRequest {
            proposers: addresses.to_vec(),
            min_round: self.params.chain_start_round,
            max_round: None,
            current_round: options.current_round,
            page_limit: self.params.page_limit,
        };
        let mut blocks = fetch_proposed_blocks(self.client.as_ref(), &request, observer).await?;
        sort_and_dedup_by_round(&mut blocks);

        info!(
            addresses = addresses.len(),
            blocks = blocks.len(),
            "synced proposed blocks without cache"
        );

        Ok(SyncOutcome {
            fetched_count: blocks.len(),
            blocks,
            start_round: self.params.chain_start_round,
            ..Default::default()
        })
    }

    /// Reads every address's cached blocks concurrently. Unreadable entries count as empty.
    async fn read_cached(&self, addresses: &[Address]) -> Vec<(Address, Vec<BlockRecord>)> {
        let reads = join_all(addresses.iter().map(|a| self.cache.get_blocks(a))).await;

        addresses
            .iter()
            .cloned()
            .zip(reads)
            .map(|(address, res)| match res {
                Ok(blocks) => (address, blocks.unwrap_or_default()),
                Err(err) => {
                    warn!(%address, %err, "failed to read block cache, refetching from chain start");
                    (address, Vec::new())
                }
            })
            .collect()
    }

    /// Writes every merged list back concurrently, returning the addresses that failed.
    async fn write_merged(&self, merged: &[(Address, Vec<BlockRecord>)]) -> Vec<Address> {
        let writes = join_all(
            merged
                .iter()
                .map(|(address, list)| self.cache.put_blocks(address, list.clone())),
        )
        .await;

        merged
            .iter()
            .zip(writes)
            .filter_map(|((address, _), res)| match res {
                Ok(()) => None,
                Err(err) => {
                    warn!(%address, %err, "failed to write block cache");
                    Some(address.clone())
                }
            })
            .collect()
    }

    /// Summaries of every cached address.
    pub async fn cached_addresses(&self) -> Result<Vec<CachedAddressInfo>, SyncError> {
        Ok(self.cache.list_addresses().await?)
    }

    pub async fn clear_cache_for_address(&self, address: &Address) -> Result<(), SyncError> {
        self.cache.clear_address(address).await?;
        info!(%address, "cleared block cache for address");
        Ok(())
    }

    pub async fn clear_all_cache(&self) -> Result<(), SyncError> {
        self.cache.clear_all().await?;
        info!("cleared block cache");
        Ok(())
    }
}
