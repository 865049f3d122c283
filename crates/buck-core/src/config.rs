use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::cache::{BlockCache, DisabledBlockCache, FileBlockCache, MemoryBlockCache};
use crate::error::CacheError;

pub const DEFAULT_MAX_WAIT_SECS: u64 = 10;
pub const DEFAULT_MEMORY_CACHE_CAPACITY: usize = 1024;

/// Where fetched payloads are kept between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CacheConfig {
    #[default]
    Disabled,
    /// One file per block in the given directory.
    Directory(PathBuf),
    /// In-process, least recently used entries are evicted beyond `capacity`.
    Memory { capacity: NonZeroUsize },
}

impl CacheConfig {
    pub fn memory() -> Self {
        // the constant is non-zero
        Self::Memory {
            capacity: NonZeroUsize::new(DEFAULT_MEMORY_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
        }
    }

    pub fn build(&self) -> Result<Arc<dyn BlockCache>, CacheError> {
        Ok(match self {
            CacheConfig::Disabled => Arc::new(DisabledBlockCache),
            CacheConfig::Directory(dir) => Arc::new(FileBlockCache::new(dir)?),
            CacheConfig::Memory { capacity } => Arc::new(MemoryBlockCache::new(*capacity)),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrieverConfig {
    pub rpc_url: Url,
    /// Upper bound on a single call to the node, including reading the response body.
    pub max_wait: Duration,
    pub cache: CacheConfig,
}

impl RetrieverConfig {
    pub fn new(rpc_url: Url) -> Self {
        Self {
            rpc_url,
            max_wait: Duration::from_secs(DEFAULT_MAX_WAIT_SECS),
            cache: CacheConfig::default(),
        }
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}
