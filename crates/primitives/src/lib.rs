//! Core data types for proposer reward tracking: canonical addresses, block records and the
//! ingestion rules that turn raw indexer headers into them.

pub mod address;
pub mod block;
pub mod params;
pub mod raw;

pub use address::{Address, AddressError};
pub use block::{max_round, sort_and_dedup_by_round, BlockRecord};
pub use raw::{RawBlockHeader, RawInteger, RawProposer};
