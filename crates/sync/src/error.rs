use rewards_db_types::DbError;
use rewards_indexer_client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("fetch: {0}")]
    Fetch(#[from] ClientError),

    #[error("cache: {0}")]
    Cache(#[from] DbError),
}

impl SyncError {
    /// The indexer could not be reached or answered badly.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// The local cache could not be read or written.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Cache(_))
    }
}
