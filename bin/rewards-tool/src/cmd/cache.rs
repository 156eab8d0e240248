use anyhow::{bail, Context, Result};
use argh::FromArgs;
use rewards_primitives::Address;
use tracing::*;

use crate::{
    cli::OutputFormat,
    context::ToolContext,
    output::{cache::CacheListing, output},
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "list-cache")]
/// List the addresses held in the local block cache
pub(crate) struct ListCacheArgs {
    /// output format: "json" or "porcelain"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "clear-cache")]
/// Remove cached blocks for one address or for all of them
pub(crate) struct ClearCacheArgs {
    /// address whose cache is removed
    #[argh(positional)]
    pub(crate) address: Option<Address>,

    /// remove every cached address
    #[argh(switch)]
    pub(crate) all: bool,
}

pub(crate) async fn list_cache(ctx: &ToolContext, args: ListCacheArgs) -> Result<()> {
    let mut entries = ctx
        .sync()
        .cached_addresses()
        .await
        .context("failed to list cached addresses")?;
    entries.sort_by(|a, b| a.address.cmp(&b.address));

    output(&CacheListing(&entries), args.output_format)
}

pub(crate) async fn clear_cache(ctx: &ToolContext, args: ClearCacheArgs) -> Result<()> {
    match (args.address, args.all) {
        (Some(address), false) => {
            ctx.sync()
                .clear_cache_for_address(&address)
                .await
                .with_context(|| format!("failed to clear cache for {address}"))?;
            info!(%address, "cleared cached blocks");
        }
        (None, true) => {
            ctx.sync()
                .clear_all_cache()
                .await
                .context("failed to clear cache")?;
            info!("cleared all cached blocks");
        }
        (Some(_), true) => bail!("pass either an address or --all, not both"),
        (None, false) => bail!("pass an address to clear, or --all"),
    }
    Ok(())
}
