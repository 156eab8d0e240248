use anyhow::{Context, Result};
use argh::FromArgs;
use rewards_primitives::Address;
use rewards_sync::{SyncOptions, SyncProgress};
use tracing::*;

use crate::{
    cli::OutputFormat,
    context::ToolContext,
    output::{output, sync::SyncReport},
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "sync")]
/// Fetch every block proposed by the given addresses
pub(crate) struct SyncArgs {
    /// addresses to sync
    #[argh(positional)]
    pub(crate) addresses: Vec<Address>,

    /// bypass the local cache for this run
    #[argh(switch)]
    pub(crate) no_cache: bool,

    /// output format: "json" or "porcelain"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) async fn sync_blocks(ctx: &ToolContext, args: SyncArgs) -> Result<()> {
    let sync = ctx.sync();
    let options = SyncOptions {
        enable_cache: ctx.enable_cache() && !args.no_cache,
        current_round: sync.current_round_hint().await,
    };

    let observer = |p: &SyncProgress| {
        info!(
            synced_until = p.synced_until_round,
            remaining = ?p.remaining_rounds,
            "sync progress"
        );
    };

    let outcome = sync
        .fetch_blocks_with_cache(&args.addresses, options, &observer)
        .await
        .context("failed to sync proposed blocks")?;

    for address in &outcome.cache_write_failures {
        warn!(%address, "blocks were fetched but could not be cached");
    }

    output(&SyncReport::new(&outcome), args.output_format)
}
