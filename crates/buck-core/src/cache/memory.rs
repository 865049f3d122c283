use std::num::NonZeroUsize;

use async_trait::async_trait;
use buck_types::{BlockNumber, RawPayload};
use lru::LruCache;
use parking_lot::Mutex;

use super::BlockCache;
use crate::error::CacheError;

/// In-process cache holding the `capacity` most recently used payloads.
#[derive(Debug)]
pub struct MemoryBlockCache {
    entries: Mutex<LruCache<BlockNumber, RawPayload>>,
}

impl MemoryBlockCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { entries: Mutex::new(LruCache::new(capacity)) }
    }

    /// Looks at an entry without touching its recency.
    pub fn peek(&self, block_number: BlockNumber) -> Option<RawPayload> {
        self.entries.lock().peek(&block_number).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl BlockCache for MemoryBlockCache {
    async fn read_finalized(
        &self,
        block_number: BlockNumber,
    ) -> Result<Option<RawPayload>, CacheError> {
        Ok(self.entries.lock().get(&block_number).cloned())
    }

    async fn write(
        &self,
        block_number: BlockNumber,
        payload: &RawPayload,
    ) -> Result<(), CacheError> {
        self.entries.lock().put(block_number, payload.clone());
        Ok(())
    }
}
