use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use buck_types::quantity::decode_quantity_u64;
use buck_types::test_utils::{finalized_block_payload, full_block_payload};
use parking_lot::Mutex;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use super::constants::{RPC_PATH, SERVED_TX_COUNT};

/// How the node answers `eth_getBlockByNumber`.
#[derive(Clone, Debug)]
pub enum NodeMode {
    /// Well-formed block of the requested shape.
    Serving,
    /// Same as `Serving`, after the given delay.
    Slow(Duration),
    /// Empty body with the given status.
    Status(StatusCode),
    /// The given body with status 200, whatever was requested.
    Body(String),
}

struct NodeState {
    mode: Mutex<NodeMode>,
    calls: AtomicUsize,
    requests: Mutex<Vec<serde_json::Value>>,
}

/// JSON-RPC node on an ephemeral local port, stopped on drop.
pub struct FakeNode {
    pub url: Url,
    state: Arc<NodeState>,
    handle: JoinHandle<()>,
}

impl FakeNode {
    pub async fn spawn(mode: NodeMode) -> Result<Self, anyhow::Error> {
        let state = Arc::new(NodeState {
            mode: Mutex::new(mode),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(vec![]),
        });
        let app = Router::new().route(RPC_PATH, post(rpc_handler)).with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let url = Url::parse(&format!("http://{}{RPC_PATH}", listener.local_addr()?))?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self { url, state, handle })
    }

    pub fn set_mode(&self, mode: NodeMode) {
        *self.state.mode.lock() = mode;
    }

    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<serde_json::Value> {
        self.state.requests.lock().clone()
    }
}

impl Drop for FakeNode {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn json_response(body: impl Into<axum::body::Body>) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body.into()).into_response()
}

fn serve_block(request: &serde_json::Value) -> Response {
    let number = request["params"][0].as_str().unwrap_or_default();
    let Ok(block_number) = decode_quantity_u64("number", number) else {
        return (StatusCode::BAD_REQUEST, format!("bad block number {number}")).into_response();
    };

    let payload = match request["params"][1].as_bool() {
        Some(true) => full_block_payload(block_number, SERVED_TX_COUNT),
        _ => finalized_block_payload(block_number),
    };

    json_response(payload.into_bytes())
}

async fn rpc_handler(
    State(state): State<Arc<NodeState>>,
    Json(request): Json<serde_json::Value>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    state.requests.lock().push(request.clone());

    let mode = state.mode.lock().clone();
    match mode {
        NodeMode::Serving => serve_block(&request),
        NodeMode::Slow(delay) => {
            tokio::time::sleep(delay).await;
            serve_block(&request)
        }
        NodeMode::Status(status) => status.into_response(),
        NodeMode::Body(body) => json_response(body),
    }
}
