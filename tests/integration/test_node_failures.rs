use std::time::Duration;

use axum::http::StatusCode;
use buck_core::error::{Error, Phase, TransportError};
use buck_core::CacheConfig;
use buck_types::error::ParseError;

use crate::common::constants::{MAX_WAIT, SHORT_MAX_WAIT};
use crate::common::fake_node::{FakeNode, NodeMode};
use crate::common::retriever_for;

#[tokio::test]
async fn slow_node_fails_with_timeout() {
    let node = FakeNode::spawn(NodeMode::Slow(Duration::from_secs(3))).await.unwrap();
    let retriever = retriever_for(&node, CacheConfig::memory(), SHORT_MAX_WAIT).unwrap();

    match retriever.get_block(1).await {
        Err(Error::TransportFailure { block_number, source: TransportError::Timeout(waited) }) => {
            assert_eq!(block_number, 1);
            assert_eq!(waited, SHORT_MAX_WAIT);
        }
        other => panic!("Unexpected result: {other:?}"),
    }
    assert_eq!(node.calls(), 1);
}

#[tokio::test]
async fn rate_limited_node_reports_status_with_hint() {
    let node = FakeNode::spawn(NodeMode::Status(StatusCode::TOO_MANY_REQUESTS)).await.unwrap();
    let retriever = retriever_for(&node, CacheConfig::memory(), MAX_WAIT).unwrap();

    let err = retriever.get_finalized_block(100).await.unwrap_err();

    assert_eq!(err.phase(), Phase::Fetch);
    match err {
        Error::TransportFailure { source: TransportError::StatusError { status, hint }, .. } => {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS.as_u16());
            assert!(hint.contains("rate limiting"));
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn node_error_object_is_malformed_response() {
    let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"invalid argument 0"}}"#;
    let node = FakeNode::spawn(NodeMode::Body(body.to_string())).await.unwrap();
    let retriever = retriever_for(&node, CacheConfig::Disabled, MAX_WAIT).unwrap();

    let err = retriever.get_block(1).await.unwrap_err();

    assert_eq!(err.phase(), Phase::Parse);
    assert!(matches!(
        err,
        Error::MalformedResponse { source: ParseError::NodeError { code: -32602, .. }, .. }
    ));
    assert_eq!(node.calls(), 1);
}

#[tokio::test]
async fn unknown_block_is_malformed_response() {
    let body = r#"{"jsonrpc":"2.0","id":1,"result":null}"#;
    let node = FakeNode::spawn(NodeMode::Body(body.to_string())).await.unwrap();
    let retriever = retriever_for(&node, CacheConfig::memory(), MAX_WAIT).unwrap();

    assert!(matches!(
        retriever.get_block(u64::MAX).await,
        Err(Error::MalformedResponse { source: ParseError::NoResult, .. })
    ));
}

#[tokio::test]
async fn stopped_node_fails_with_communication_error() {
    let node = FakeNode::spawn(NodeMode::Serving).await.unwrap();
    let retriever = retriever_for(&node, CacheConfig::Disabled, MAX_WAIT).unwrap();
    drop(node);
    // let the aborted server task release the port
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(matches!(
        retriever.get_block(1).await,
        Err(Error::TransportFailure { source: TransportError::CommunicationError(_), .. })
    ));
}
