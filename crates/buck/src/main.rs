use buck_core::BlockRetriever;
use clap::Parser;
use cli::{Args, Command};
use serde_json::to_string_pretty;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod metrics;

/// Configures tracing with default level INFO,
/// If the environment variable `RUST_LOG` is set, it will be used instead.
/// Logs go to stderr so that stdout only carries the requested blocks.
fn configure_tracing() {
    let level_filter_layer =
        EnvFilter::builder().with_default_directive(tracing::Level::INFO.into()).from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(level_filter_layer)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(retriever: &BlockRetriever, command: &Command) -> Result<String, anyhow::Error> {
    let output = match command {
        Command::Block { block_number } => {
            to_string_pretty(&retriever.get_block(*block_number).await?)?
        }
        Command::Finalized { block_number } => {
            to_string_pretty(&retriever.get_finalized_block(*block_number).await?)?
        }
        Command::Range { from, to, concurrency } => {
            anyhow::ensure!(from <= to, "Range start {from} is after range end {to}");
            info!("Retrieving blocks {from}..={to}, {concurrency} at a time");
            to_string_pretty(&retriever.get_blocks(*from..=*to, *concurrency).await?)?
        }
    };

    Ok(output)
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    configure_tracing();

    // parse arguments
    let args = Args::parse();
    let config = args.to_config();
    info!("Using node at {} with {:?} cache", config.rpc_url, config.cache);

    let retriever = BlockRetriever::new(&config)?;
    let result = run(&retriever, &args.command).await;

    if args.dump_metrics {
        match metrics::get_metrics() {
            Ok(metrics) => eprint!("{metrics}"),
            Err(e) => warn!("Error gathering metrics: {}", e),
        }
    }

    println!("{}", result?);
    Ok(())
}
