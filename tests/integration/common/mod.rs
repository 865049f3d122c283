#![cfg(test)]
pub mod constants;
pub mod fake_node;

use std::time::Duration;

use buck_core::{BlockRetriever, CacheConfig, RetrieverConfig};

use self::fake_node::FakeNode;

pub fn retriever_for(
    node: &FakeNode,
    cache: CacheConfig,
    max_wait: Duration,
) -> Result<BlockRetriever, anyhow::Error> {
    let config =
        RetrieverConfig::new(node.url.clone()).with_max_wait(max_wait).with_cache(cache);
    Ok(BlockRetriever::new(&config)?)
}
