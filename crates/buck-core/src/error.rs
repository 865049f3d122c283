use std::time::Duration;

use buck_types::error::ParseError;
use buck_types::BlockNumber;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch block #{block_number}: {source}")]
    TransportFailure { block_number: BlockNumber, source: TransportError },
    #[error("Failed to encode request for block #{block_number}: {source}")]
    MalformedRequest { block_number: BlockNumber, source: serde_json::Error },
    #[error("Failed to parse block #{block_number}: {source}")]
    MalformedResponse { block_number: BlockNumber, source: ParseError },
}

/// Stage of a retrieval at which an [`Error`] was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Fetch,
    Parse,
}

impl Error {
    pub fn block_number(&self) -> BlockNumber {
        match self {
            Error::TransportFailure { block_number, .. }
            | Error::MalformedRequest { block_number, .. }
            | Error::MalformedResponse { block_number, .. } => *block_number,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Error::TransportFailure { .. } | Error::MalformedRequest { .. } => Phase::Fetch,
            Error::MalformedResponse { .. } => Phase::Parse,
        }
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("No response from node within {0:?}")]
    Timeout(Duration),
    #[error("Error in communication with node: {0}")]
    CommunicationError(String),
    #[error("Node responded with status {status}. {hint}")]
    StatusError { status: reqwest::StatusCode, hint: &'static str },
}

impl TransportError {
    pub fn from_status_code(status: reqwest::StatusCode) -> Self {
        let hint = match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                "The node is rate limiting requests. Lower the batch concurrency or use another \
                 RPC endpoint."
            }
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                "Check the credentials embedded in the RPC URL."
            }
            _ => "",
        };

        TransportError::StatusError { status, hint }
    }
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("I/O error on cache entry {path}: {source}")]
    IoError { source: std::io::Error, path: String },
    #[error("Cannot use {path} as cache directory: {source}")]
    DirectoryError { source: std::io::Error, path: String },
}

pub type BuckResult<T, E = Error> = Result<T, E>;
