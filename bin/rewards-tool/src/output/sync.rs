//! Sync result formatting

use rewards_primitives::{Address, BlockRecord};
use rewards_sync::SyncOutcome;
use serde::Serialize;

use super::{helpers::porcelain_field, traits::Formattable};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SyncReport<'a> {
    pub(crate) start_round: u64,
    pub(crate) block_count: usize,
    pub(crate) fetched_count: usize,
    pub(crate) cached_count: usize,
    pub(crate) short_circuited: bool,
    /// Sum of proposer payouts in microalgos
    pub(crate) total_payout: u64,
    pub(crate) cache_write_failures: &'a [Address],
    pub(crate) blocks: &'a [BlockRecord],
}

impl<'a> SyncReport<'a> {
    pub(crate) fn new(outcome: &'a SyncOutcome) -> Self {
        Self {
            start_round: outcome.start_round,
            block_count: outcome.blocks.len(),
            fetched_count: outcome.fetched_count,
            cached_count: outcome.cached_count,
            short_circuited: outcome.short_circuited,
            total_payout: outcome
                .blocks
                .iter()
                .map(|b| b.proposer_payout)
                .fold(0u64, u64::saturating_add),
            cache_write_failures: &outcome.cache_write_failures,
            blocks: &outcome.blocks,
        }
    }
}

impl Formattable for SyncReport<'_> {
    fn format_porcelain(&self) -> String {
        let mut output = vec![
            porcelain_field("sync.start_round", self.start_round),
            porcelain_field("sync.block_count", self.block_count),
            porcelain_field("sync.fetched_count", self.fetched_count),
            porcelain_field("sync.cached_count", self.cached_count),
            porcelain_field("sync.short_circuited", self.short_circuited),
            porcelain_field("sync.total_payout", self.total_payout),
        ];

        for (i, address) in self.cache_write_failures.iter().enumerate() {
            output.push(porcelain_field(
                &format!("sync.cache_write_failures[{i}]"),
                address,
            ));
        }

        for (i, block) in self.blocks.iter().enumerate() {
            output.push(porcelain_field(&format!("blocks[{i}].round"), block.round));
            output.push(porcelain_field(
                &format!("blocks[{i}].timestamp"),
                block.timestamp,
            ));
            output.push(porcelain_field(
                &format!("blocks[{i}].proposer"),
                &block.proposer,
            ));
            output.push(porcelain_field(
                &format!("blocks[{i}].proposer_payout"),
                block.proposer_payout,
            ));
        }

        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{cli::OutputFormat, output::helpers::output_to};

    fn outcome() -> SyncOutcome {
        let proposer = Address::from_public_key(&[3u8; 32]);
        SyncOutcome {
            blocks: vec![
                BlockRecord::new(46512900, 1_718_000_000, proposer.clone(), 10_000_000),
                BlockRecord::new(46513000, 1_718_000_300, proposer, 12_500_000),
            ],
            start_round: 46512890,
            fetched_count: 1,
            cached_count: 1,
            short_circuited: false,
            cache_write_failures: Vec::new(),
        }
    }

    #[test]
    fn test_sync_report_json_format() {
        let outcome = outcome();
        let mut buffer = Cursor::new(Vec::new());
        output_to(&SyncReport::new(&outcome), OutputFormat::Json, &mut buffer).unwrap();

        let output = String::from_utf8(buffer.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["startRound"], 46512890);
        assert_eq!(json["blockCount"], 2);
        assert_eq!(json["totalPayout"], 22_500_000);
        assert_eq!(json["blocks"][1]["proposerPayout"], 12_500_000);
        assert_eq!(json["cacheWriteFailures"], serde_json::json!([]));
    }

    #[test]
    fn test_sync_report_porcelain_format() {
        let mut outcome = outcome();
        outcome
            .cache_write_failures
            .push(Address::from_public_key(&[4u8; 32]));

        let mut buffer = Cursor::new(Vec::new());
        output_to(
            &SyncReport::new(&outcome),
            OutputFormat::Porcelain,
            &mut buffer,
        )
        .unwrap();

        let output = String::from_utf8(buffer.into_inner()).unwrap();
        assert!(output.contains("sync.start_round: 46512890"));
        assert!(output.contains("sync.fetched_count: 1"));
        assert!(output.contains("sync.cached_count: 1"));
        assert!(output.contains("sync.short_circuited: false"));
        assert!(output.contains("sync.cache_write_failures[0]: "));
        assert!(output.contains("blocks[0].round: 46512900"));
        assert!(output.contains("blocks[1].proposer_payout: 12500000"));
    }
}
