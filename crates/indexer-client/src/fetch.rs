use rewards_primitives::{Address, BlockRecord};
use tracing::*;

use crate::{
    client::IndexerClient,
    errors::ClientError,
    progress::{ProgressObserver, SyncProgress},
    types::BlockHeadersQuery,
};

/// Parameters of a paginated proposer block fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub proposers: Vec<Address>,

    /// First round to fetch, inclusive.
    pub min_round: u64,

    /// Last round to fetch, inclusive. Unbounded when `None`.
    pub max_round: Option<u64>,

    /// Chain tip hint used for progress reporting.
    pub current_round: Option<u64>,

    pub page_limit: u64,
}

/// Fetches every valid block proposed by `request.proposers` in the requested range, following
/// continuation tokens until the indexer stops returning one.
///
/// The observer sees one event before the first page and one after each page. Headers that do
/// not convert into a [`BlockRecord`] are dropped. Records are returned in page order and are
/// not deduplicated across pages.
pub async fn fetch_proposed_blocks<C>(
    client: &C,
    request: &FetchRequest,
    observer: &dyn ProgressObserver,
) -> Result<Vec<BlockRecord>, ClientError>
where
    C: IndexerClient + ?Sized,
{
    if request.proposers.is_empty() {
        return Err(ClientError::NoProposers);
    }

    let mut current_round = request.current_round;
    let mut synced_until = request.min_round;
    observer.on_progress(&SyncProgress::new(
        synced_until,
        request.min_round,
        current_round,
    ));

    let mut blocks = Vec::new();
    let mut next = None;
    let mut page_idx = 0usize;
    loop {
        let query = BlockHeadersQuery {
            proposers: request.proposers.clone(),
            min_round: request.min_round,
            max_round: request.max_round,
            limit: request.page_limit,
            next: next.take(),
        };
        let page = client.block_headers(query).await?;

        let received = page.blocks.len();
        let before = blocks.len();
        blocks.extend(page.blocks.iter().filter_map(BlockRecord::from_raw));
        let accepted = blocks.len() - before;

        if let Some(highest) = blocks[before..].iter().map(|b| b.round).max() {
            synced_until = synced_until.max(highest);
        }
        current_round = current_round.or(page.current_round);

        debug!(
            page = page_idx,
            received,
            dropped = received - accepted,
            %synced_until,
            "fetched block headers page"
        );
        observer.on_progress(&SyncProgress::new(
            synced_until,
            request.min_round,
            current_round,
        ));

        match page.continuation() {
            Some(token) => next = Some(token.to_owned()),
            None => break,
        }
        page_idx += 1;
    }

    Ok(blocks)
}
