use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use buck_core::config::DEFAULT_MAX_WAIT_SECS;
use buck_core::{CacheConfig, RetrieverConfig};
use buck_types::BlockNumber;
use clap::{Parser, Subcommand};
use url::Url;

pub(crate) const DEFAULT_CONCURRENCY: usize = 4;

/// Fetch Ethereum blocks from a JSON-RPC node, with an optional local cache
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Args {
    #[arg(long = "rpc-url")]
    #[arg(env = "ETH_RPC_URL")]
    #[arg(value_name = "URL")]
    #[arg(help = "Specify the URL of the Ethereum JSON-RPC node;")]
    rpc_url: Url,

    #[arg(long = "max-wait")]
    #[arg(env = "BUCK_MAX_WAIT")]
    #[arg(value_name = "SECONDS")]
    #[arg(default_value_t = DEFAULT_MAX_WAIT_SECS)]
    #[arg(help = "Specify how long to wait for a single node response;")]
    max_wait: u64,

    #[arg(long = "cache-dir")]
    #[arg(env = "BUCK_CACHE_DIR")]
    #[arg(value_name = "DIR")]
    #[arg(help = "Specify the directory to cache node responses in;")]
    cache_dir: Option<PathBuf>,

    #[arg(long = "memory-cache-capacity")]
    #[arg(value_name = "BLOCKS")]
    #[arg(conflicts_with = "cache_dir")]
    #[arg(help = "Specify the number of node responses to keep in memory instead of on disk;")]
    memory_cache_capacity: Option<NonZeroUsize>,

    #[arg(long = "dump-metrics")]
    #[arg(help = "Print metrics in Prometheus text format to stderr before exiting;")]
    pub(crate) dump_metrics: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Print the block with full transaction objects
    Block {
        #[arg(value_name = "BLOCK_NUMBER")]
        block_number: BlockNumber,
    },
    /// Print the block summary with transaction hashes only, always fetched from the node
    Finalized {
        #[arg(value_name = "BLOCK_NUMBER")]
        block_number: BlockNumber,
    },
    /// Print all blocks from FROM to TO, both inclusive
    Range {
        #[arg(value_name = "FROM")]
        from: BlockNumber,

        #[arg(value_name = "TO")]
        to: BlockNumber,

        #[arg(long = "concurrency")]
        #[arg(value_name = "REQUESTS")]
        #[arg(default_value_t = DEFAULT_CONCURRENCY)]
        #[arg(help = "Specify how many blocks to retrieve at the same time;")]
        concurrency: usize,
    },
}

impl Args {
    pub(crate) fn to_config(&self) -> RetrieverConfig {
        let cache = match (&self.cache_dir, self.memory_cache_capacity) {
            (Some(dir), _) => CacheConfig::Directory(dir.clone()),
            (None, Some(capacity)) => CacheConfig::Memory { capacity },
            (None, None) => CacheConfig::Disabled,
        };

        RetrieverConfig::new(self.rpc_url.clone())
            .with_max_wait(Duration::from_secs(self.max_wait))
            .with_cache(cache)
    }
}
