use std::sync::Arc;

use buck_types::rpc::block::{parse_block, parse_finalized_block};
use buck_types::{Block, BlockDetail, BlockNumber, FinalizedBlock, RawPayload};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, error, info};

use crate::cache::BlockCache;
use crate::config::RetrieverConfig;
use crate::error::{BuckResult, CacheError, Error};
use crate::fetcher::RemoteFetcher;
use crate::metrics::{CACHE_CORRUPTED, CACHE_HIT, CACHE_LOOKUP_COUNT, CACHE_MISS};
use crate::transport::{HttpTransport, Transport};

/// Entry point for block retrieval. Serves full blocks from the cache when possible and
/// falls back to the node otherwise.
///
/// Cloning is cheap; clones share the transport and the cache.
#[derive(Debug, Clone)]
pub struct BlockRetriever {
    fetcher: RemoteFetcher,
    cache: Arc<dyn BlockCache>,
}

impl BlockRetriever {
    /// Talks to `config.rpc_url` over HTTP and uses the configured cache.
    pub fn new(config: &RetrieverConfig) -> Result<Self, CacheError> {
        let cache = config.cache.build()?;
        Ok(Self::with_collaborators(Arc::new(HttpTransport::new()), cache, config))
    }

    pub fn with_collaborators(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn BlockCache>,
        config: &RetrieverConfig,
    ) -> Self {
        let fetcher =
            RemoteFetcher::new(transport, cache.clone(), config.rpc_url.clone(), config.max_wait);
        Self { fetcher, cache }
    }

    /// Counts misses only. A cached payload is counted once its parse decides between hit and
    /// corrupted.
    async fn lookup(&self, block_number: BlockNumber) -> Option<RawPayload> {
        match self.cache.read_finalized(block_number).await {
            Ok(Some(payload)) => Some(payload),
            Ok(None) => {
                CACHE_LOOKUP_COUNT.with_label_values(&[CACHE_MISS]).inc();
                debug!(block_number, "Block not in cache");
                None
            }
            Err(err) => {
                CACHE_LOOKUP_COUNT.with_label_values(&[CACHE_MISS]).inc();
                debug!(block_number, error = %err, "Cache lookup failed, treating as miss");
                None
            }
        }
    }

    /// Returns the block with full transaction objects.
    ///
    /// A cached payload that fails to parse is treated as corrupted and replaced by one fresh
    /// fetch. A freshly fetched payload that fails to parse is an error.
    pub async fn get_block(&self, block_number: BlockNumber) -> BuckResult<Block> {
        let (payload, fresh_copy) = match self.lookup(block_number).await {
            Some(payload) => (payload, false),
            None => {
                let payload =
                    self.fetcher.fetch_raw(block_number, BlockDetail::FullTransactions).await?;
                (payload, true)
            }
        };

        match parse_block(&payload) {
            Ok(block) => {
                if fresh_copy {
                    info!(block_number, transactions = block.transactions.len(), "Parsed block");
                } else {
                    CACHE_LOOKUP_COUNT.with_label_values(&[CACHE_HIT]).inc();
                    info!(block_number, "Serving block from cache");
                }
                Ok(block)
            }
            Err(source) if fresh_copy => {
                error!(block_number, error = %source, "Failed to parse block from node");
                Err(Error::MalformedResponse { block_number, source })
            }
            Err(err) => {
                CACHE_LOOKUP_COUNT.with_label_values(&[CACHE_CORRUPTED]).inc();
                error!(block_number, error = %err, "Cached block is corrupted, fetching it again");

                let payload =
                    self.fetcher.fetch_raw(block_number, BlockDetail::FullTransactions).await?;
                let block = parse_block(&payload).map_err(|source| {
                    error!(block_number, error = %source, "Failed to parse block from node");
                    Error::MalformedResponse { block_number, source }
                })?;

                info!(block_number, transactions = block.transactions.len(), "Parsed block");
                Ok(block)
            }
        }
    }

    /// Returns the block with transaction hashes only. Always asks the node; the response is
    /// written to the cache like any other fetch.
    pub async fn get_finalized_block(
        &self,
        block_number: BlockNumber,
    ) -> BuckResult<FinalizedBlock> {
        let payload = self.fetcher.fetch_raw(block_number, BlockDetail::TransactionHashes).await?;

        let block = parse_finalized_block(&payload).map_err(|source| {
            error!(block_number, error = %source, "Failed to parse finalized block from node");
            Error::MalformedResponse { block_number, source }
        })?;
        info!(block_number, timestamp = %block.timestamp, "Parsed finalized block");

        Ok(block)
    }

    /// Retrieves every block of `block_numbers` with at most `concurrency` retrievals in flight.
    ///
    /// Blocks are returned in the order they were requested. The first failure aborts the batch.
    pub async fn get_blocks(
        &self,
        block_numbers: impl IntoIterator<Item = BlockNumber>,
        concurrency: usize,
    ) -> BuckResult<Vec<Block>> {
        stream::iter(block_numbers)
            .map(|block_number| self.get_block(block_number))
            .buffered(concurrency.max(1))
            .try_collect()
            .await
    }
}
