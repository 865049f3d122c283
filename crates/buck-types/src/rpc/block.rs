use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseResult;
use crate::quantity::{decode_quantity_u64, decode_timestamp};
use crate::rpc::envelope::JsonRpcResponse;
use crate::serde_helpers::hex_quantity::deserialize_block_number;

pub type BlockNumber = u64;
pub type BlockHash = String;
pub type TxHash = String;

/// Response bytes exactly as received from the node or read back from the cache.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawPayload(Bytes);

impl RawPayload {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Bytes> for RawPayload {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(Bytes::from(bytes))
    }
}

impl From<&'static str> for RawPayload {
    fn from(body: &'static str) -> Self {
        Self(Bytes::from_static(body.as_bytes()))
    }
}

/// A transaction object of a full block. Only the hash is typed; the remaining fields are kept
/// as the node sent them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: TxHash,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Block fetched with full transaction objects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(deserialize_with = "deserialize_block_number")]
    pub number: BlockNumber,
    pub hash: BlockHash,
    pub transactions: Vec<Transaction>,
}

/// Summary of a block fetched with transaction hashes only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedBlock {
    /// Absent on blocks mined before the London fork.
    pub base_fee_per_gas: Option<String>,
    pub gas_limit: String,
    pub gas_used: String,
    pub hash: BlockHash,
    pub number: BlockNumber,
    pub receipts_root: String,
    pub size: String,
    pub state_root: String,
    pub timestamp: DateTime<Utc>,
    pub transactions: Vec<TxHash>,
}

/// Wire shape of [`FinalizedBlock`], before `number` and `timestamp` are decoded.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinalizedBlockFields {
    base_fee_per_gas: Option<String>,
    gas_limit: String,
    gas_used: String,
    hash: BlockHash,
    number: String,
    receipts_root: String,
    size: String,
    state_root: String,
    timestamp: String,
    transactions: Vec<TxHash>,
}

impl TryFrom<FinalizedBlockFields> for FinalizedBlock {
    type Error = crate::error::ConversionError;

    fn try_from(fields: FinalizedBlockFields) -> Result<Self, Self::Error> {
        let timestamp = decode_timestamp("timestamp", &fields.timestamp)?;
        let number = decode_quantity_u64("number", &fields.number)?;

        Ok(Self {
            base_fee_per_gas: fields.base_fee_per_gas,
            gas_limit: fields.gas_limit,
            gas_used: fields.gas_used,
            hash: fields.hash,
            number,
            receipts_root: fields.receipts_root,
            size: fields.size,
            state_root: fields.state_root,
            timestamp,
            transactions: fields.transactions,
        })
    }
}

/// Decodes the `result` of an `eth_getBlockByNumber` call made with full transaction objects.
pub fn parse_block(payload: &RawPayload) -> ParseResult<Block> {
    JsonRpcResponse::<Block>::from_slice(payload.as_bytes())?.into_result()
}

/// Decodes the `result` of an `eth_getBlockByNumber` call made with transaction hashes only.
pub fn parse_finalized_block(payload: &RawPayload) -> ParseResult<FinalizedBlock> {
    let fields =
        JsonRpcResponse::<FinalizedBlockFields>::from_slice(payload.as_bytes())?.into_result()?;

    Ok(FinalizedBlock::try_from(fields)?)
}
