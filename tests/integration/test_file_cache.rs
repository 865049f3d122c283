use buck_core::CacheConfig;
use buck_types::rpc::block::parse_block;
use buck_types::RawPayload;

use crate::common::constants::{MAX_WAIT, SERVED_TX_COUNT};
use crate::common::fake_node::{FakeNode, NodeMode};
use crate::common::retriever_for;

#[tokio::test]
async fn cached_blocks_survive_retriever_restart() {
    let node = FakeNode::spawn(NodeMode::Serving).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheConfig::Directory(dir.path().to_path_buf());

    let first_run = retriever_for(&node, cache.clone(), MAX_WAIT).unwrap();
    let fetched = first_run.get_block(7).await.unwrap();
    let second_run = retriever_for(&node, cache, MAX_WAIT).unwrap();
    let cached = second_run.get_block(7).await.unwrap();

    assert_eq!(fetched, cached);
    assert_eq!(node.calls(), 1);
    assert!(dir.path().join("7.json").is_file());
}

#[tokio::test]
async fn truncated_cache_file_is_replaced() {
    let node = FakeNode::spawn(NodeMode::Serving).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("9.json");
    std::fs::write(&entry, br#"{"jsonrpc":"2.0","id":1,"result":{"num"#).unwrap();

    let retriever =
        retriever_for(&node, CacheConfig::Directory(dir.path().to_path_buf()), MAX_WAIT).unwrap();
    let block = retriever.get_block(9).await.unwrap();

    assert_eq!(block.number, 9);
    assert_eq!(node.calls(), 1);

    let repaired = RawPayload::from(std::fs::read(&entry).unwrap());
    assert_eq!(parse_block(&repaired).unwrap(), block);
}

#[tokio::test]
async fn finalized_fetch_overwrites_entry_which_is_healed_by_next_block_fetch() {
    let node = FakeNode::spawn(NodeMode::Serving).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let retriever =
        retriever_for(&node, CacheConfig::Directory(dir.path().to_path_buf()), MAX_WAIT).unwrap();

    retriever.get_finalized_block(11).await.unwrap();
    let block = retriever.get_block(11).await.unwrap();
    retriever.get_block(11).await.unwrap();

    assert_eq!(block.transactions.len() as u64, SERVED_TX_COUNT);
    assert_eq!(node.calls(), 2);
}

#[tokio::test]
async fn malformed_node_payload_is_cached_but_not_returned() {
    let node = FakeNode::spawn(NodeMode::Body("{\"result\":[]}".to_string())).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let retriever =
        retriever_for(&node, CacheConfig::Directory(dir.path().to_path_buf()), MAX_WAIT).unwrap();

    assert!(retriever.get_block(3).await.is_err());
    assert_eq!(node.calls(), 1);
    assert_eq!(std::fs::read(dir.path().join("3.json")).unwrap(), b"{\"result\":[]}");

    // the stored payload is treated as corrupted on the next call
    node.set_mode(NodeMode::Serving);
    let block = retriever.get_block(3).await.unwrap();
    assert_eq!(block.number, 3);
    assert_eq!(node.calls(), 2);
}
