pub mod error;
pub mod quantity;
pub mod rpc;
pub mod serde_helpers;
#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

// Re export libraries
pub use rpc::block::{Block, BlockNumber, FinalizedBlock, RawPayload, Transaction};
pub use rpc::envelope::{BlockDetail, JsonRpcRequest, JsonRpcResponse};
pub use {bytes, chrono, num_bigint};
