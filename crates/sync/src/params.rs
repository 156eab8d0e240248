use rewards_primitives::{
    params::{DEFAULT_FRESH_TOLERANCE_ROUNDS, DEFAULT_PAGE_LIMIT, MAINNET_REWARDS_START_ROUND},
    Address, BlockRecord,
};
use serde::{Deserialize, Serialize};

/// Policy knobs of the sync engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncParams {
    /// Round from which an address without cache is fetched.
    pub chain_start_round: u64,

    /// When the next round to fetch is within this many rounds of the chain tip the cache is
    /// served without asking the indexer.
    pub fresh_tolerance_rounds: u64,

    pub page_limit: u64,
}

impl Default for SyncParams {
    fn default() -> Self {
        Self {
            chain_start_round: MAINNET_REWARDS_START_ROUND,
            fresh_tolerance_rounds: DEFAULT_FRESH_TOLERANCE_ROUNDS,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Per-call options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyncOptions {
    pub enable_cache: bool,

    /// Chain tip hint, used for progress and the freshness short-circuit.
    pub current_round: Option<u64>,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            enable_cache: true,
            current_round: None,
        }
    }
}

/// Result of a sync.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Sorted ascending by round, unique by round.
    pub blocks: Vec<BlockRecord>,

    /// First round of the shared fetch.
    pub start_round: u64,

    /// Records in `blocks` that came from the indexer during this call.
    pub fetched_count: usize,

    /// Records in `blocks` that were served from the cache.
    pub cached_count: usize,

    /// The cache was fresh enough that the shared fetch was skipped.
    pub short_circuited: bool,

    /// Addresses whose merged list could not be written back.
    pub cache_write_failures: Vec<Address>,
}
