//! Block cache database operations interface.

use rewards_db_types::{traits::BlockCacheDatabase, AddressCacheEntry, CachedAddressInfo};
use rewards_primitives::{Address, BlockRecord};

use crate::{exec::*, instrumentation::components};

inst_ops_simple! {
    (<D: BlockCacheDatabase> => BlockCacheOps, component = components::STORAGE_BLOCK_CACHE) {
        get_blocks(address: Address) => Option<Vec<BlockRecord>>;
        get_entry(address: Address) => Option<AddressCacheEntry>;
        put_blocks(address: Address, blocks: Vec<BlockRecord>) => ();
        get_max_round(address: Address) => Option<u64>;
        clear_address(address: Address) => ();
        clear_all() => ();
        list_addresses() => Vec<CachedAddressInfo>;
    }
}
