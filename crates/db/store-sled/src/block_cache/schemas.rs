use rewards_db_types::AddressCacheEntry;
use rewards_primitives::Address;

use crate::define_borsh_table;

define_borsh_table!(
    /// Table holding the cached proposed blocks of each tracked address.
    (AddressBlocksSchema) Address => AddressCacheEntry
);
