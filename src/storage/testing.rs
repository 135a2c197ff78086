//! Test doubles for `ReadingStore`.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;

use super::{ReadingStore, StorageError, StorageMode};
use crate::models::{Reading, ReadingRow, StoredReading};

pub fn sample_reading(source: &str) -> Reading {
    Reading {
        voltage: 5.02,
        current: 120.5,
        power: 604.9,
        temperature: 24.3,
        humidity: 51.0,
        light_level: 0,
        fan_status: "ON".into(),
        led_status: "OFF".into(),
        source: source.into(),
    }
}

/// Keeps rows in memory and assigns increasing ids, like a real table.
/// Counts every call so tests can assert storage was (not) reached.
///
/// Reports a real (non-degraded) backend so handlers take the persisted path.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredReading>>,
    inserts: AtomicUsize,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadingStore for MemoryStore {
    fn mode(&self) -> StorageMode {
        StorageMode::Postgres
    }

    async fn insert(&self, reading: &Reading) -> Result<Vec<StoredReading>, StorageError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = StoredReading::try_from(ReadingRow {
            id: rows.len() as i64 + 1,
            created_at: Some(chrono::Utc::now()),
            reading: reading.clone(),
        })?;
        rows.push(row.clone());
        Ok(vec![row])
    }

    async fn recent(&self, limit: usize) -> Result<Vec<StoredReading>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().rev().take(limit).cloned().collect())
    }
}

/// Every call fails the way an unreachable or misconfigured backend would.
/// Reports a real backend: fallback mode never fails.
pub struct FailingStore;

#[async_trait]
impl ReadingStore for FailingStore {
    fn mode(&self) -> StorageMode {
        StorageMode::Supabase
    }

    async fn insert(&self, _reading: &Reading) -> Result<Vec<StoredReading>, StorageError> {
        Err(StorageError::Api {
            status: 503,
            code: None,
            message: "project is paused".into(),
        })
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<StoredReading>, StorageError> {
        Err(StorageError::Api {
            status: 503,
            code: None,
            message: "project is paused".into(),
        })
    }
}

/// Returns fixed rows verbatim, the way the hosted database hands back
/// whatever columns its table has.
pub struct FixedRowsStore {
    rows: Vec<StoredReading>,
}

impl FixedRowsStore {
    /// Panics if `rows` is not an array of JSON objects.
    pub fn new(rows: serde_json::Value) -> Self {
        Self {
            rows: serde_json::from_value(rows).unwrap(),
        }
    }
}

#[async_trait]
impl ReadingStore for FixedRowsStore {
    fn mode(&self) -> StorageMode {
        StorageMode::Supabase
    }

    async fn insert(&self, _reading: &Reading) -> Result<Vec<StoredReading>, StorageError> {
        Ok(self.rows.iter().take(1).cloned().collect())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<StoredReading>, StorageError> {
        Ok(self.rows.iter().take(limit).cloned().collect())
    }
}
