//! Module for database local types

use borsh::{BorshDeserialize, BorshSerialize};
use rewards_primitives::{max_round, Address, BlockRecord};
use serde::{Deserialize, Serialize};

/// Persisted cache entry for a single address.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AddressCacheEntry {
    /// Ordered ascending by round with no repeated rounds.
    pub blocks: Vec<BlockRecord>,

    /// Unix milliseconds of the last write.
    pub last_updated: u64,
}

impl AddressCacheEntry {
    pub fn new(blocks: Vec<BlockRecord>, last_updated: u64) -> Self {
        Self {
            blocks,
            last_updated,
        }
    }

    pub fn max_round(&self) -> Option<u64> {
        max_round(&self.blocks)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Serialized size of the entry as stored.
    pub fn size_in_bytes(&self) -> usize {
        borsh::object_length(self).unwrap_or_default()
    }

    pub fn into_blocks(self) -> Vec<BlockRecord> {
        self.blocks
    }
}

/// Summary of one cached address, as shown to users managing the cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedAddressInfo {
    pub address: Address,
    pub block_count: usize,
    pub last_updated: u64,
    pub size_in_bytes: usize,
}

impl CachedAddressInfo {
    pub fn from_entry(address: Address, entry: &AddressCacheEntry) -> Self {
        Self {
            address,
            block_count: entry.block_count(),
            last_updated: entry.last_updated,
            size_in_bytes: entry.size_in_bytes(),
        }
    }
}
