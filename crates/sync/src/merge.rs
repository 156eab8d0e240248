//! Pure planning and merging steps of a sync. Everything here operates on data owned by a single
//! invocation.

use std::collections::HashSet;

use rewards_primitives::{max_round, sort_and_dedup_by_round, Address, BlockRecord};

/// Removes repeated addresses, keeping first-seen order.
pub(crate) fn dedup_addresses(addresses: &[Address]) -> Vec<Address> {
    let mut seen = HashSet::new();
    addresses
        .iter()
        .filter(|a| seen.insert(*a))
        .cloned()
        .collect()
}

/// Which rounds need fetching, given what each address has cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FetchPlan {
    /// Highest watermark plus one, or the chain start if nothing is cached.
    pub(crate) min_start_round: u64,

    /// Addresses whose own next round is below `min_start_round`, with the lowest such round.
    pub(crate) catch_up: Option<CatchUp>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CatchUp {
    pub(crate) addresses: Vec<Address>,
    pub(crate) start_round: u64,
    /// Inclusive.
    pub(crate) end_round: u64,
}

impl FetchPlan {
    pub(crate) fn new(cached: &[(Address, Vec<BlockRecord>)], chain_start_round: u64) -> Self {
        let next_rounds: Vec<_> = cached
            .iter()
            .map(|(address, blocks)| {
                let next = max_round(blocks).map_or(chain_start_round, |r| r.saturating_add(1));
                (address, next)
            })
            .collect();

        let min_start_round = cached
            .iter()
            .filter_map(|(_, blocks)| max_round(blocks))
            .max()
            .map_or(chain_start_round, |r| r.saturating_add(1));

        let lagging: Vec<_> = next_rounds
            .iter()
            .filter(|(_, next)| *next < min_start_round)
            .collect();
        let catch_up = lagging
            .iter()
            .map(|(_, next)| *next)
            .min()
            .map(|start_round| CatchUp {
                addresses: lagging.iter().map(|(a, _)| (*a).clone()).collect(),
                start_round,
                end_round: min_start_round - 1,
            });

        Self {
            min_start_round,
            catch_up,
        }
    }

    /// Whether the cache is close enough to the tip to skip the shared fetch.
    pub(crate) fn is_fresh(&self, current_round: Option<u64>, tolerance: u64) -> bool {
        current_round.is_some_and(|cur| self.min_start_round.saturating_add(tolerance) >= cur)
    }
}

/// Appends the fetched blocks proposed by `address` to its cached list, then sorts and dedups.
///
/// Cached records come first so they win over refetched records for the same round.
pub(crate) fn merge_for_address(
    address: &Address,
    mut cached: Vec<BlockRecord>,
    fetched: &[BlockRecord],
) -> Vec<BlockRecord> {
    cached.extend(
        fetched
            .iter()
            .filter(|b| &b.proposer == address)
            .cloned(),
    );
    sort_and_dedup_by_round(&mut cached);
    cached
}

/// Concatenates per-address lists into one sorted list, unique by round.
pub(crate) fn combine<'a>(lists: impl IntoIterator<Item = &'a Vec<BlockRecord>>) -> Vec<BlockRecord> {
    let mut all: Vec<_> = lists.into_iter().flatten().cloned().collect();
    sort_and_dedup_by_round(&mut all);
    all
}
