use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// A block query was attempted without any proposer to filter on.
    #[error("no proposers given")]
    NoProposers,

    #[error("network: {0}")]
    Network(String),

    #[error("indexer returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode response: {0}")]
    Decode(String),

    #[error("invalid indexer url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}
