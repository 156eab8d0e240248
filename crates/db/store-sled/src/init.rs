use std::{fs, path::Path, sync::Arc};

use anyhow::Context;
use rewards_db_types::DbResult;
use tracing::*;
use typed_sled::SledDb;

use crate::block_cache::db::BlockCacheDBSled;

/// Version of the on-disk layout. Bumped whenever stored records change meaning.
///
/// Version 1 kept proposers as base64 key bytes; version 2 stores canonical addresses.
pub const SCHEMA_VERSION: u32 = 2;

/// Key in the default tree under which the schema version is kept.
const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

// Opens sled database instance from datadir
pub fn open_sled_database(datadir: &Path, dbname: &str) -> anyhow::Result<Arc<SledDb>> {
    let mut database_dir = datadir.to_path_buf();
    database_dir.push("sled");
    database_dir.push(dbname);

    if !database_dir.exists() {
        fs::create_dir_all(&database_dir)?;
    }

    let sled_db = sled::open(&database_dir).context("opening sled database")?;

    let db = init_sled_db(sled_db).context("initializing sled database")?;
    Ok(db)
}

/// Brings the store up to [`SCHEMA_VERSION`] and wraps it for typed access.
pub fn init_sled_db(sled_db: sled::Db) -> DbResult<Arc<SledDb>> {
    ensure_schema_version(&sled_db)?;
    let db = SledDb::new(sled_db)?;
    Ok(Arc::new(db))
}

fn read_schema_version(db: &sled::Db) -> DbResult<Option<u32>> {
    let Some(raw) = db.get(SCHEMA_VERSION_KEY)? else {
        return Ok(None);
    };

    // A malformed stamp is treated like a foreign version.
    let version = <[u8; 4]>::try_from(raw.as_ref())
        .map(u32::from_be_bytes)
        .unwrap_or(0);
    Ok(Some(version))
}

/// Stamps a fresh store, or drops all cached blocks if the store was written under any other
/// version. Old records are never reinterpreted.
fn ensure_schema_version(db: &sled::Db) -> DbResult<()> {
    let found = read_schema_version(db)?;
    if found == Some(SCHEMA_VERSION) {
        return Ok(());
    }

    let mut dropped = false;
    for name in BlockCacheDBSled::TREE_NAMES {
        dropped |= db.drop_tree(*name)?;
    }
    if found.is_some() || dropped {
        warn!(
            ?found,
            expected = SCHEMA_VERSION,
            "block cache schema changed, discarding cached blocks"
        );
    } else {
        debug!(version = SCHEMA_VERSION, "stamping new block cache store");
    }

    db.insert(SCHEMA_VERSION_KEY, SCHEMA_VERSION.to_be_bytes().to_vec())?;
    db.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rewards_db_types::traits::BlockCacheDatabase;
    use rewards_primitives::{Address, BlockRecord};

    use super::*;

    fn addr() -> Address {
        Address::from_public_key(&[4u8; 32])
    }

    fn seed_cache(sled_db: &sled::Db) {
        let db = BlockCacheDBSled::new(init_sled_db(sled_db.clone()).unwrap()).unwrap();
        let a = addr();
        db.put_blocks(a.clone(), vec![BlockRecord::new(10, 1, a, 5)])
            .unwrap();
    }

    #[test]
    fn test_fresh_store_is_stamped() {
        let sled_db = sled::Config::new().temporary(true).open().unwrap();
        init_sled_db(sled_db.clone()).unwrap();
        assert_eq!(read_schema_version(&sled_db).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_matching_version_preserves_cache() {
        let sled_db = sled::Config::new().temporary(true).open().unwrap();
        seed_cache(&sled_db);

        let db = BlockCacheDBSled::new(init_sled_db(sled_db).unwrap()).unwrap();
        assert_eq!(db.get_max_round(addr()).unwrap(), Some(10));
    }

    #[test]
    fn test_older_version_wipes_cache() {
        let sled_db = sled::Config::new().temporary(true).open().unwrap();
        seed_cache(&sled_db);
        sled_db
            .insert(SCHEMA_VERSION_KEY, 1u32.to_be_bytes().to_vec())
            .unwrap();

        let db = BlockCacheDBSled::new(init_sled_db(sled_db.clone()).unwrap()).unwrap();
        assert_eq!(db.get_blocks(addr()).unwrap(), None);
        assert_eq!(read_schema_version(&sled_db).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_newer_version_wipes_cache() {
        let sled_db = sled::Config::new().temporary(true).open().unwrap();
        seed_cache(&sled_db);
        sled_db
            .insert(SCHEMA_VERSION_KEY, (SCHEMA_VERSION + 1).to_be_bytes().to_vec())
            .unwrap();

        let db = BlockCacheDBSled::new(init_sled_db(sled_db).unwrap()).unwrap();
        assert!(db.list_addresses().unwrap().is_empty());
    }

    #[test]
    fn test_unversioned_data_is_wiped() {
        let sled_db = sled::Config::new().temporary(true).open().unwrap();
        seed_cache(&sled_db);
        sled_db.remove(SCHEMA_VERSION_KEY).unwrap();

        let db = BlockCacheDBSled::new(init_sled_db(sled_db).unwrap()).unwrap();
        assert_eq!(db.get_blocks(addr()).unwrap(), None);
    }

    #[test]
    fn test_open_sled_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let db = BlockCacheDBSled::new(open_sled_database(dir.path(), "cache").unwrap())
                .unwrap();
            let a = addr();
            db.put_blocks(a.clone(), vec![BlockRecord::new(7, 1, a, 5)])
                .unwrap();
        }

        assert!(dir.path().join("sled").join("cache").exists());
        let db =
            BlockCacheDBSled::new(open_sled_database(dir.path(), "cache").unwrap()).unwrap();
        assert_eq!(db.get_max_round(addr()).unwrap(), Some(7));
    }
}
