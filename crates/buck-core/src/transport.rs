use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::trace;
use url::Url;

use crate::error::TransportError;

/// Delivers one request body to the node and hands back the raw response body.
///
/// Implementations must give up once `max_wait` has elapsed and report it as
/// [`TransportError::Timeout`]. Retrying is up to the caller.
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    async fn post(
        &self,
        url: &Url,
        body: Vec<u8>,
        max_wait: Duration,
    ) -> Result<Bytes, TransportError>;
}

/// HTTP transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

fn map_reqwest_error(err: reqwest::Error, max_wait: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(max_wait)
    } else {
        TransportError::CommunicationError(format!("{err:?}"))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(
        &self,
        url: &Url,
        body: Vec<u8>,
        max_wait: Duration,
    ) -> Result<Bytes, TransportError> {
        let resp = self
            .client
            .post(url.clone())
            .timeout(max_wait)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, max_wait))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::from_status_code(status));
        }

        // the timeout set on the request also bounds reading the body
        let body = resp.bytes().await.map_err(|e| map_reqwest_error(e, max_wait))?;
        trace!(url = %url, bytes = body.len(), "Node responded");

        Ok(body)
    }
}
