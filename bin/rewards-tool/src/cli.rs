use std::{fmt, path::PathBuf, str::FromStr};

use argh::FromArgs;

use crate::cmd::{
    cache::{ClearCacheArgs, ListCacheArgs},
    sync::SyncArgs,
};

#[derive(Debug, FromArgs)]
#[argh(description = "Proposer rewards block sync and cache tool")]
pub(crate) struct Cli {
    #[argh(option, short = 'c', description = "path to configuration")]
    pub(crate) config: Option<PathBuf>,

    #[argh(option, short = 'd', description = "datadir path, overrides the config")]
    pub(crate) datadir: Option<PathBuf>,

    #[argh(option, description = "indexer base url, overrides the config")]
    pub(crate) indexer_url: Option<String>,

    #[argh(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(Debug, PartialEq, FromArgs)]
#[argh(subcommand)]
pub(crate) enum Command {
    Sync(SyncArgs),
    ListCache(ListCacheArgs),
    ClearCache(ClearCacheArgs),
}

/// How command results are written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Json,
    Porcelain,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "porcelain" => Ok(Self::Porcelain),
            other => Err(format!(
                "unknown output format '{other}', expected 'json' or 'porcelain'"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Porcelain => f.write_str("porcelain"),
        }
    }
}
