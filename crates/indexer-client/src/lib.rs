//! Client for the indexer REST API and the paginated proposer block fetch built on top of it.

mod client;
mod errors;
mod fetch;
mod http;
mod progress;
mod types;

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockIndexerClient;
pub use client::IndexerClient;
pub use errors::ClientError;
pub use fetch::{fetch_proposed_blocks, FetchRequest};
pub use http::{HttpIndexerClient, HttpIndexerConfig, API_TOKEN_HEADER};
pub use progress::{ProgressObserver, SyncProgress};
pub use types::{BlockHeadersPage, BlockHeadersQuery};
