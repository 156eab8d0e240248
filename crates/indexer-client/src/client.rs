use async_trait::async_trait;

use crate::{
    errors::ClientError,
    types::{BlockHeadersPage, BlockHeadersQuery},
};

/// Read access to an indexer of the chain.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait IndexerClient: Send + Sync {
    /// Fetches a single page of block headers proposed by any of `query.proposers`.
    async fn block_headers(&self, query: BlockHeadersQuery)
        -> Result<BlockHeadersPage, ClientError>;

    /// Latest round known to the indexer.
    async fn current_round(&self) -> Result<u64, ClientError>;
}
