use std::sync::Arc;
use std::time::{Duration, Instant};

use buck_types::rpc::envelope::GET_BLOCK_BY_NUMBER;
use buck_types::{BlockDetail, BlockNumber, JsonRpcRequest, RawPayload};
use tracing::{debug, info, warn};
use url::Url;

use crate::cache::BlockCache;
use crate::error::{BuckResult, Error};
use crate::metrics::{CACHE_WRITE_FAILURE_COUNT, UPSTREAM_CALL_COUNT, UPSTREAM_CALL_DURATION};
use crate::transport::Transport;

/// Makes exactly one `eth_getBlockByNumber` call per [`RemoteFetcher::fetch_raw`].
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn BlockCache>,
    rpc_url: Url,
    max_wait: Duration,
}

impl RemoteFetcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn BlockCache>,
        rpc_url: Url,
        max_wait: Duration,
    ) -> Self {
        Self { transport, cache, rpc_url, max_wait }
    }

    /// Fetches the payload of `block_number` in the shape selected by `detail`.
    ///
    /// The response is written to the cache before it is parsed, so a payload that later fails
    /// to parse still ends up stored. Failing to store it does not fail the fetch.
    pub async fn fetch_raw(
        &self,
        block_number: BlockNumber,
        detail: BlockDetail,
    ) -> BuckResult<RawPayload> {
        let body = JsonRpcRequest::get_block_by_number(block_number, detail)
            .to_bytes()
            .map_err(|source| Error::MalformedRequest { block_number, source })?;
        debug!(block_number, ?detail, url = %self.rpc_url, "Requesting block from node");

        let start = Instant::now();
        let result = self.transport.post(&self.rpc_url, body, self.max_wait).await;
        let status = if result.is_ok() { "success" } else { "error" };
        UPSTREAM_CALL_DURATION
            .with_label_values(&[GET_BLOCK_BY_NUMBER, status])
            .observe(start.elapsed().as_secs_f64());
        UPSTREAM_CALL_COUNT.with_label_values(&[GET_BLOCK_BY_NUMBER, status]).inc();

        let payload = RawPayload::from(
            result.map_err(|source| Error::TransportFailure { block_number, source })?,
        );
        info!(block_number, bytes = payload.len(), "Fetched block from node");

        if let Err(err) = self.cache.write(block_number, &payload).await {
            CACHE_WRITE_FAILURE_COUNT.inc();
            warn!(block_number, error = %err, "Failed to write block to cache");
        }

        Ok(payload)
    }
}
