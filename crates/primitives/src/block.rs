use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A block proposed by a tracked account, with the reward paid to its proposer.
#[derive(
    Clone, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub round: u64,

    /// Seconds since the unix epoch.
    pub timestamp: u64,

    pub proposer: Address,

    /// Reward in microalgos. Never zero for a record that passed ingestion.
    pub proposer_payout: u64,
}

impl BlockRecord {
    pub fn new(round: u64, timestamp: u64, proposer: Address, proposer_payout: u64) -> Self {
        Self {
            round,
            timestamp,
            proposer,
            proposer_payout,
        }
    }
}

/// Sorts records ascending by round and drops later records sharing a round.
///
/// The sort is stable, so among records with the same round the one that appeared first in the
/// input survives.
pub fn sort_and_dedup_by_round(blocks: &mut Vec<BlockRecord>) {
    blocks.sort_by_key(|b| b.round);
    blocks.dedup_by_key(|b| b.round);
}

/// Highest round in the list, `None` when empty.
pub fn max_round(blocks: &[BlockRecord]) -> Option<u64> {
    blocks.iter().map(|b| b.round).max()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rec(round: u64, payout: u64) -> BlockRecord {
        BlockRecord::new(
            round,
            1_700_000_000,
            Address::from_public_key(&[1u8; 32]),
            payout,
        )
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut blocks = vec![rec(500, 1), rec(400, 2), rec(500, 3)];
        sort_and_dedup_by_round(&mut blocks);
        assert_eq!(blocks, vec![rec(400, 2), rec(500, 1)]);
    }

    #[test]
    fn test_max_round_empty_is_none() {
        assert_eq!(max_round(&[]), None);
        assert_eq!(max_round(&[rec(7, 1), rec(3, 1)]), Some(7));
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(rec(10, 5)).unwrap();
        assert_eq!(json["round"], 10);
        assert_eq!(json["proposerPayout"], 5);
        assert!(json["proposer"].is_string());
    }

    proptest! {
        #[test]
        fn proptest_sort_and_dedup_invariants(
            rounds in proptest::collection::vec(0u64..200, 0..64),
        ) {
            let mut blocks: Vec<_> = rounds
                .iter()
                .enumerate()
                .map(|(i, r)| rec(*r, i as u64 + 1))
                .collect();
            sort_and_dedup_by_round(&mut blocks);

            for pair in blocks.windows(2) {
                prop_assert!(pair[0].round < pair[1].round);
            }

            // Each surviving record is the first one in the input with that round.
            for b in &blocks {
                let first = rounds.iter().position(|r| *r == b.round).unwrap();
                prop_assert_eq!(b.proposer_payout, first as u64 + 1);
            }
        }
    }
}
