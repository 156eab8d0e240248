//! Command line front end for the proposer rewards block sync and its local cache.

mod cli;
mod cmd;
mod context;
mod output;

use anyhow::Result;
use argh::from_env;
use tokio::runtime;
use tracing::info;

use crate::{
    cli::{Cli, Command},
    cmd::{
        cache::{clear_cache, list_cache},
        sync::sync_blocks,
    },
    context::{init_logging, load_config, ToolContext},
};

fn main() -> Result<()> {
    let cli: Cli = from_env();

    let config = load_config(&cli)?;
    init_logging(&config);

    let rt = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("rewards-rt")
        .build()?;

    let ctx = ToolContext::new(&config)?;

    let result = rt.block_on(async {
        match cli.cmd {
            Command::Sync(args) => sync_blocks(&ctx, args).await,
            Command::ListCache(args) => list_cache(&ctx, args).await,
            Command::ClearCache(args) => clear_cache(&ctx, args).await,
        }
    });

    info!("exiting rewards-tool");
    result
}
