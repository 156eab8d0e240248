//! Database types and traits for the proposer block cache.

pub mod errors;
pub mod traits;
pub mod types;

pub use errors::DbError;
pub use traits::BlockCacheDatabase;
pub use types::{AddressCacheEntry, CachedAddressInfo};

pub type DbResult<T> = Result<T, DbError>;
