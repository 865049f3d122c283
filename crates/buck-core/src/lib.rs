pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod retriever;
pub mod transport;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use config::{CacheConfig, RetrieverConfig};
pub use retriever::BlockRetriever;
