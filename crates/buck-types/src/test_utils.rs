//! Node responses shaped like the ones returned by `eth_getBlockByNumber`.

use serde_json::json;

use crate::quantity::encode_quantity;
use crate::rpc::block::{BlockNumber, RawPayload};

fn hash_of(value: u64) -> String {
    format!("0x{value:064x}")
}

/// `result` object of a full block with `tx_count` transaction objects.
pub fn full_block_result(block_number: BlockNumber, tx_count: u64) -> serde_json::Value {
    let transactions: Vec<_> = (0..tx_count)
        .map(|index| {
            json!({
                "blockNumber": encode_quantity(block_number),
                "from": "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5",
                "gas": "0x5208",
                "hash": hash_of(block_number * 1000 + index),
                "input": "0x",
                "nonce": encode_quantity(index),
                "to": "0x388c818ca8b9251b393131c08a736a67ccb19297",
                "transactionIndex": encode_quantity(index),
                "value": "0xde0b6b3a7640000",
            })
        })
        .collect();

    json!({
        "baseFeePerGas": "0x7",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "hash": hash_of(block_number),
        "number": encode_quantity(block_number),
        "parentHash": hash_of(block_number.saturating_sub(1)),
        "timestamp": "0x5f5e100",
        "transactions": transactions,
    })
}

/// `result` object of a hashes-only block at height 100 with timestamp 100000000.
pub fn finalized_block_result() -> serde_json::Value {
    json!({
        "baseFeePerGas": "0x7",
        "gasLimit": "0x1c9c380",
        "gasUsed": "0x5208",
        "hash": hash_of(100),
        "number": "0x64",
        "parentHash": hash_of(99),
        "receiptsRoot": hash_of(2),
        "size": "0x220",
        "stateRoot": hash_of(3),
        "timestamp": "0x5f5e100",
        "transactions": ["0xaa", "0xbb"],
    })
}

/// Wraps `result` in a JSON-RPC 2.0 response envelope.
pub fn payload_from_result(result: serde_json::Value) -> RawPayload {
    let body = json!({ "jsonrpc": "2.0", "id": 1, "result": result });
    RawPayload::from(body.to_string().into_bytes())
}

pub fn full_block_payload(block_number: BlockNumber, tx_count: u64) -> RawPayload {
    payload_from_result(full_block_result(block_number, tx_count))
}

pub fn finalized_block_payload(block_number: BlockNumber) -> RawPayload {
    let mut result = finalized_block_result();
    result["number"] = json!(encode_quantity(block_number));
    payload_from_result(result)
}

/// Bytes that look like a cached response cut off mid-write.
pub fn corrupted_payload() -> RawPayload {
    RawPayload::from(r#"{"jsonrpc":"2.0","id":1,"result":{"number":"0x"#)
}
