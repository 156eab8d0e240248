//! Incremental sync of proposed blocks for a set of addresses, backed by the local block cache.

mod error;
mod merge;
mod params;
mod sync;

pub use error::SyncError;
pub use params::{SyncOptions, SyncOutcome, SyncParams};
pub use rewards_indexer_client::{ProgressObserver, SyncProgress};
pub use sync::BlockSync;
