use rewards_primitives::{Address, RawBlockHeader};
use serde::Deserialize;

/// One request to the block headers endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeadersQuery {
    pub proposers: Vec<Address>,

    /// Inclusive.
    pub min_round: u64,

    /// Inclusive.
    pub max_round: Option<u64>,

    pub limit: u64,

    /// Continuation token returned with the previous page.
    pub next: Option<String>,
}

/// One page of block headers.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BlockHeadersPage {
    #[serde(default)]
    pub blocks: Vec<RawBlockHeader>,

    /// Round the indexer had reached when it served the page.
    #[serde(default)]
    pub current_round: Option<u64>,

    #[serde(default)]
    pub next_token: Option<String>,
}

impl BlockHeadersPage {
    /// Continuation token, if there is another page to fetch.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct HealthResponse {
    pub(crate) round: u64,
}
