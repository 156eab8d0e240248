//! Trait definitions for low level database interfaces.

use rewards_primitives::{Address, BlockRecord};

use crate::{
    types::{AddressCacheEntry, CachedAddressInfo},
    DbResult,
};

/// Database interface for the per-address block cache.
///
/// Each address owns exactly one entry which is always replaced wholesale. Operations are NOT
/// VALIDATED at this level; callers are expected to hand in lists that are already sorted and
/// deduplicated by round.
pub trait BlockCacheDatabase: Send + Sync + 'static {
    /// Returns the cached blocks for an address, `None` if nothing was ever stored for it.
    fn get_blocks(&self, address: Address) -> DbResult<Option<Vec<BlockRecord>>>;

    /// Returns the full entry, including when it was last written.
    fn get_entry(&self, address: Address) -> DbResult<Option<AddressCacheEntry>>;

    /// Replaces the entry for an address and stamps it with the current time.
    fn put_blocks(&self, address: Address, blocks: Vec<BlockRecord>) -> DbResult<()>;

    /// Highest cached round for an address. `None` both when there is no entry and when the
    /// entry holds no blocks.
    fn get_max_round(&self, address: Address) -> DbResult<Option<u64>>;

    /// Deletes the entry for an address. Deleting a missing entry is not an error.
    fn clear_address(&self, address: Address) -> DbResult<()>;

    /// Deletes every entry.
    fn clear_all(&self) -> DbResult<()>;

    /// Summaries of every cached address, in no particular order.
    fn list_addresses(&self) -> DbResult<Vec<CachedAddressInfo>>;
}
