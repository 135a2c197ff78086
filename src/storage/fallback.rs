use async_trait::async_trait;

use super::{ReadingStore, StorageError, StorageMode};
use crate::models::{Reading, StoredReading};

/// Stand-in used when no database is configured.
///
/// Accepts every write and forgets it; every read comes back empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackStore;

#[async_trait]
impl ReadingStore for FallbackStore {
    fn mode(&self) -> StorageMode {
        StorageMode::Fallback
    }

    async fn insert(&self, _reading: &Reading) -> Result<Vec<StoredReading>, StorageError> {
        Ok(Vec::new())
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<StoredReading>, StorageError> {
        Ok(Vec::new())
    }
}
