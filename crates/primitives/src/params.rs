//! Chain constants and sync policy defaults.

/// First round at which proposer payouts were live on mainnet.
pub const MAINNET_REWARDS_START_ROUND: u64 = 46_512_890;

/// A cache whose next round is within this many rounds of the tip is considered fresh.
pub const DEFAULT_FRESH_TOLERANCE_ROUNDS: u64 = 10;

/// Page size requested from the indexer.
pub const DEFAULT_PAGE_LIMIT: u64 = 1000;
