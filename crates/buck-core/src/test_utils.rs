//! Scripted stand-ins for the node, for use in tests of code built on [`crate::BlockRetriever`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use buck_types::quantity::decode_quantity_u64;
use buck_types::test_utils::{finalized_block_payload, full_block_payload};
use buck_types::{BlockDetail, BlockNumber, RawPayload};
use bytes::Bytes;
use parking_lot::Mutex;
use url::Url;

use crate::error::TransportError;
use crate::transport::Transport;

/// Number of transaction objects in blocks served by [`MockTransport::serving_blocks`].
pub const SERVED_TX_COUNT: u64 = 2;

type Responder =
    dyn Fn(BlockNumber, BlockDetail) -> Result<RawPayload, TransportError> + Send + Sync;

/// A request as seen by [`MockTransport`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub block_number: BlockNumber,
    pub detail: BlockDetail,
    pub body: serde_json::Value,
}

/// Answers from a queue of scripted responses first, then from a responder function.
pub struct MockTransport {
    queued: Mutex<VecDeque<Result<RawPayload, TransportError>>>,
    responder: Box<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("queued", &self.queued.lock().len())
            .field("calls", &self.calls())
            .field("delay", &self.delay)
            .finish()
    }
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(BlockNumber, BlockDetail) -> Result<RawPayload, TransportError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Serves a well-formed payload of the requested shape for every block number.
    pub fn serving_blocks() -> Self {
        Self::new(|block_number, detail| {
            Ok(match detail {
                BlockDetail::FullTransactions => full_block_payload(block_number, SERVED_TX_COUNT),
                BlockDetail::TransactionHashes => finalized_block_payload(block_number),
            })
        })
    }

    /// Serves `responses` in order, then falls back to [`MockTransport::serving_blocks`].
    pub fn with_responses(responses: Vec<Result<RawPayload, TransportError>>) -> Self {
        let transport = Self::serving_blocks();
        transport.queued.lock().extend(responses);
        transport
    }

    /// Fails every call with a communication error.
    pub fn unreachable() -> Self {
        Self::new(|_, _| Err(TransportError::CommunicationError("connection refused".to_string())))
    }

    /// Delays every response. Calls whose `max_wait` is shorter fail with a timeout.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn calls_for(&self, block_number: BlockNumber) -> usize {
        self.requests.lock().iter().filter(|r| r.block_number == block_number).count()
    }

    fn record(&self, body: &[u8]) -> Result<RecordedRequest, TransportError> {
        let body: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| TransportError::CommunicationError(format!("invalid request: {e}")))?;

        let number = body["params"][0].as_str().unwrap_or_default();
        let block_number = decode_quantity_u64("number", number)
            .map_err(|e| TransportError::CommunicationError(e.to_string()))?;
        let detail = match body["params"][1].as_bool() {
            Some(true) => BlockDetail::FullTransactions,
            _ => BlockDetail::TransactionHashes,
        };

        let request = RecordedRequest { block_number, detail, body };
        self.requests.lock().push(request.clone());
        Ok(request)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post(
        &self,
        _url: &Url,
        body: Vec<u8>,
        max_wait: Duration,
    ) -> Result<Bytes, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let request = self.record(&body)?;

        if let Some(delay) = self.delay {
            if delay > max_wait {
                tokio::time::sleep(max_wait).await;
                return Err(TransportError::Timeout(max_wait));
            }
            tokio::time::sleep(delay).await;
        }

        let queued = self.queued.lock().pop_front();
        let response = match queued {
            Some(response) => response,
            None => (self.responder)(request.block_number, request.detail),
        };

        response.map(RawPayload::into_bytes)
    }
}
