use chrono::Utc;
use rewards_db_types::{
    traits::BlockCacheDatabase, AddressCacheEntry, CachedAddressInfo, DbResult,
};
use rewards_primitives::{Address, BlockRecord};
use tracing::*;

use super::schemas::AddressBlocksSchema;
use crate::define_sled_database;

define_sled_database!(
    pub struct BlockCacheDBSled {
        blocks_tree: AddressBlocksSchema,
    }
);

fn now_millis() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}

impl BlockCacheDatabase for BlockCacheDBSled {
    fn get_blocks(&self, address: Address) -> DbResult<Option<Vec<BlockRecord>>> {
        Ok(self
            .blocks_tree
            .get(&address)?
            .map(AddressCacheEntry::into_blocks))
    }

    fn get_entry(&self, address: Address) -> DbResult<Option<AddressCacheEntry>> {
        Ok(self.blocks_tree.get(&address)?)
    }

    fn put_blocks(&self, address: Address, blocks: Vec<BlockRecord>) -> DbResult<()> {
        let entry = AddressCacheEntry::new(blocks, now_millis());
        trace!(%address, blocks = entry.block_count(), "writing cache entry");
        self.blocks_tree.insert(&address, &entry)?;
        Ok(())
    }

    fn get_max_round(&self, address: Address) -> DbResult<Option<u64>> {
        Ok(self
            .blocks_tree
            .get(&address)?
            .and_then(|entry| entry.max_round()))
    }

    fn clear_address(&self, address: Address) -> DbResult<()> {
        self.blocks_tree.remove(&address)?;
        Ok(())
    }

    fn clear_all(&self) -> DbResult<()> {
        let mut keys = Vec::new();
        for item in self.blocks_tree.iter() {
            let (address, _) = item?;
            keys.push(address);
        }

        for address in &keys {
            self.blocks_tree.remove(address)?;
        }
        debug!(removed = keys.len(), "cleared block cache");
        Ok(())
    }

    fn list_addresses(&self) -> DbResult<Vec<CachedAddressInfo>> {
        let mut result = Vec::new();
        for item in self.blocks_tree.iter() {
            let (address, entry) = item?;
            result.push(CachedAddressInfo::from_entry(address, &entry));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::macros::sled_db_test_setup;

    sled_db_test_setup!(BlockCacheDBSled);

    fn addr(seed: u8) -> Address {
        Address::from_public_key(&[seed; 32])
    }

    fn block(round: u64, proposer: &Address) -> BlockRecord {
        BlockRecord::new(round, 1_718_000_000 + round, proposer.clone(), 1_000 + round)
    }

    #[test]
    fn test_unknown_address_is_empty() {
        let db = setup_db();
        assert_eq!(db.get_blocks(addr(1)).unwrap(), None);
        assert_eq!(db.get_entry(addr(1)).unwrap(), None);
        assert_eq!(db.get_max_round(addr(1)).unwrap(), None);
        assert!(db.list_addresses().unwrap().is_empty());
    }

    #[test]
    fn test_put_get_roundtrip() {
        let db = setup_db();
        let a = addr(1);
        let blocks = vec![block(50, &a), block(75, &a), block(100, &a)];

        db.put_blocks(a.clone(), blocks.clone()).unwrap();

        assert_eq!(db.get_blocks(a.clone()).unwrap(), Some(blocks));
        assert_eq!(db.get_max_round(a.clone()).unwrap(), Some(100));
        assert!(db.get_entry(a).unwrap().unwrap().last_updated > 0);
    }

    #[test]
    fn test_put_replaces_wholesale() {
        let db = setup_db();
        let a = addr(1);
        db.put_blocks(a.clone(), vec![block(10, &a), block(20, &a)])
            .unwrap();
        db.put_blocks(a.clone(), vec![block(5, &a)]).unwrap();

        assert_eq!(db.get_blocks(a.clone()).unwrap(), Some(vec![block(5, &a)]));
        assert_eq!(db.get_max_round(a).unwrap(), Some(5));
    }

    #[test]
    fn test_empty_entry_has_no_watermark() {
        let db = setup_db();
        let a = addr(1);
        db.put_blocks(a.clone(), vec![]).unwrap();

        assert_eq!(db.get_blocks(a.clone()).unwrap(), Some(vec![]));
        assert_eq!(db.get_max_round(a).unwrap(), None);
    }

    #[test]
    fn test_clear_address_only_touches_that_address() {
        let db = setup_db();
        let (a, b) = (addr(1), addr(2));
        db.put_blocks(a.clone(), vec![block(1, &a)]).unwrap();
        db.put_blocks(b.clone(), vec![block(2, &b)]).unwrap();

        db.clear_address(a.clone()).unwrap();
        // Clearing again is a no-op.
        db.clear_address(a.clone()).unwrap();

        assert_eq!(db.get_blocks(a).unwrap(), None);
        assert_eq!(db.get_blocks(b.clone()).unwrap(), Some(vec![block(2, &b)]));
    }

    #[test]
    fn test_clear_all_and_list() {
        let db = setup_db();
        let (a, b) = (addr(1), addr(2));
        db.put_blocks(a.clone(), vec![block(1, &a), block(3, &a)])
            .unwrap();
        db.put_blocks(b.clone(), vec![block(2, &b)]).unwrap();

        let mut infos = db.list_addresses().unwrap();
        infos.sort_by(|x, y| x.address.cmp(&y.address));
        assert_eq!(infos.len(), 2);
        let info_a = infos.iter().find(|i| i.address == a).unwrap();
        assert_eq!(info_a.block_count, 2);
        assert!(info_a.size_in_bytes > 0);

        db.clear_all().unwrap();
        assert!(db.list_addresses().unwrap().is_empty());
        assert_eq!(db.get_blocks(b).unwrap(), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn proptest_max_round_matches_stored(
            rounds in proptest::collection::btree_set(0u64..10_000, 0..32),
        ) {
            let db = setup_db();
            let a = addr(9);
            let blocks: Vec<_> = rounds.iter().map(|r| block(*r, &a)).collect();

            db.put_blocks(a.clone(), blocks.clone()).unwrap();

            prop_assert_eq!(db.get_max_round(a.clone()).unwrap(), rounds.iter().max().copied());
            prop_assert_eq!(db.get_blocks(a).unwrap(), Some(blocks));
        }
    }
}
