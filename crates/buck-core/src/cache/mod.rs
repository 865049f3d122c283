mod file;
mod memory;

use async_trait::async_trait;
use buck_types::{BlockNumber, RawPayload};
pub use file::FileBlockCache;
pub use memory::MemoryBlockCache;

use crate::error::CacheError;

/// Storage for raw node responses, keyed by block number.
///
/// Only responses for finalized heights are worth keeping; entries are never invalidated, only
/// overwritten. Implementations must tolerate concurrent reads and writes.
#[async_trait]
pub trait BlockCache: std::fmt::Debug + Send + Sync {
    /// Returns the stored payload, or `None` if nothing was stored for `block_number`.
    async fn read_finalized(
        &self,
        block_number: BlockNumber,
    ) -> Result<Option<RawPayload>, CacheError>;

    /// Stores `payload`, replacing any previous entry for `block_number`.
    async fn write(
        &self,
        block_number: BlockNumber,
        payload: &RawPayload,
    ) -> Result<(), CacheError>;
}

/// DISABLED BLOCK CACHE

/// Stores nothing; every lookup misses.
#[derive(Debug, Clone, Default)]
pub struct DisabledBlockCache;

#[async_trait]
impl BlockCache for DisabledBlockCache {
    async fn read_finalized(
        &self,
        _block_number: BlockNumber,
    ) -> Result<Option<RawPayload>, CacheError> {
        Ok(None)
    }

    async fn write(
        &self,
        _block_number: BlockNumber,
        _payload: &RawPayload,
    ) -> Result<(), CacheError> {
        Ok(())
    }
}
