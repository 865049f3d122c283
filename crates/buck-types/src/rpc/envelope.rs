use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ParseError, ParseResult};
use crate::quantity::encode_quantity;
use crate::rpc::block::BlockNumber;

pub const JSONRPC_VERSION: &str = "2.0";
pub const GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";

/// One request is in flight per envelope, so the id never has to be correlated.
const REQUEST_ID: u64 = 1;

/// Selects which of the two `eth_getBlockByNumber` payload shapes the node should return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockDetail {
    /// Transactions as full objects; parsed into [`crate::Block`].
    FullTransactions,
    /// Transactions as hashes only; parsed into [`crate::FinalizedBlock`].
    TransactionHashes,
}

impl BlockDetail {
    pub fn include_full_transactions(self) -> bool {
        matches!(self, Self::FullTransactions)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: &'static str, params: serde_json::Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, method, params, id: REQUEST_ID }
    }

    pub fn get_block_by_number(block_number: BlockNumber, detail: BlockDetail) -> Self {
        Self::new(
            GET_BLOCK_BY_NUMBER,
            json!([encode_quantity(block_number), detail.include_full_transactions()]),
        )
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// Response envelope. Only `result` and `error` matter; `jsonrpc` and `id` are not checked.
#[derive(Clone, Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
}

impl<T: DeserializeOwned> JsonRpcResponse<T> {
    pub fn from_slice(body: &[u8]) -> ParseResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Unpacks `result`. A `null` or missing result and a node error object are both failures.
    pub fn into_result(self) -> ParseResult<T> {
        match (self.result, self.error) {
            (_, Some(JsonRpcError { code, message })) => {
                Err(ParseError::NodeError { code, message })
            }
            (Some(result), None) => Ok(result),
            (None, None) => Err(ParseError::NoResult),
        }
    }
}
