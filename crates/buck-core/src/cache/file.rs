use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use buck_types::{BlockNumber, RawPayload};

use super::BlockCache;
use crate::error::CacheError;

/// Distinguishes temporary files of concurrent writers within this process.
static TMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Keeps each payload in its own file, `<dir>/<block_number>.json`.
#[derive(Debug, Clone)]
pub struct FileBlockCache {
    dir: PathBuf,
}

impl FileBlockCache {
    /// Uses `dir` as the cache directory, creating it if it doesn't exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| CacheError::DirectoryError {
            source,
            path: dir.display().to_string(),
        })?;

        Ok(Self { dir })
    }

    pub fn entry_path(&self, block_number: BlockNumber) -> PathBuf {
        self.dir.join(format!("{block_number}.json"))
    }

    fn tmp_path(&self, block_number: BlockNumber) -> PathBuf {
        let unique = TMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(".{block_number}.json.{}.{unique}.tmp", std::process::id()))
    }
}

fn io_error(source: std::io::Error, path: &Path) -> CacheError {
    CacheError::IoError { source, path: path.display().to_string() }
}

#[async_trait]
impl BlockCache for FileBlockCache {
    async fn read_finalized(
        &self,
        block_number: BlockNumber,
    ) -> Result<Option<RawPayload>, CacheError> {
        let path = self.entry_path(block_number);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(RawPayload::from(bytes))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err, &path)),
        }
    }

    /// Writes to a temporary sibling first and renames it into place, so that readers see either
    /// the previous entry or the complete new one.
    async fn write(
        &self,
        block_number: BlockNumber,
        payload: &RawPayload,
    ) -> Result<(), CacheError> {
        let tmp_path = self.tmp_path(block_number);
        let path = self.entry_path(block_number);

        if let Err(err) = tokio::fs::write(&tmp_path, payload.as_bytes()).await {
            // the partial file is useless and would otherwise linger
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(io_error(err, &tmp_path));
        }

        if let Err(err) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(io_error(err, &path));
        }

        Ok(())
    }
}
