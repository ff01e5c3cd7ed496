//! In-memory trend store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::catalog::{poster_url, Movie, DEFAULT_IMAGE_BASE_URL};
use crate::trend::{TrendError, TrendRecord, TrendStore};

/// Mock implementation of the TrendStore trait.
///
/// Keeps records in memory with the same counting and ordering rules as the
/// SQLite store, and can be told to fail reads or writes.
#[derive(Debug)]
pub struct MockTrendStore {
    records: Mutex<HashMap<String, TrendRecord>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl Default for MockTrendStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTrendStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make `top`, `get` and `count` fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `record_search` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a record directly.
    pub fn insert(&self, record: TrendRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.search_term.clone(), record);
    }

    /// All records, unordered.
    pub fn records(&self) -> Vec<TrendRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    fn check_read(&self) -> Result<(), TrendError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(TrendError::Read("Mock read failure".to_string()));
        }
        Ok(())
    }
}

impl TrendStore for MockTrendStore {
    fn record_search(&self, search_term: &str, movie: &Movie) -> Result<TrendRecord, TrendError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrendError::Write("Mock write failure".to_string()));
        }

        let now = Utc::now();
        let mut records = self.records.lock().unwrap();
        let record = records
            .entry(search_term.to_string())
            .and_modify(|r| {
                r.count += 1;
                r.updated_at = now;
            })
            .or_insert_with(|| TrendRecord {
                id: Uuid::new_v4().to_string(),
                search_term: search_term.to_string(),
                count: 1,
                movie_id: movie.id,
                poster_url: movie
                    .poster_path
                    .as_deref()
                    .map(|path| poster_url(DEFAULT_IMAGE_BASE_URL, path)),
                created_at: now,
                updated_at: now,
            });
        Ok(record.clone())
    }

    fn top(&self, limit: u32) -> Result<Vec<TrendRecord>, TrendError> {
        self.check_read()?;

        let mut records = self.records();
        records.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
                .then_with(|| a.search_term.cmp(&b.search_term))
        });
        records.truncate(limit as usize);
        Ok(records)
    }

    fn get(&self, search_term: &str) -> Result<Option<TrendRecord>, TrendError> {
        self.check_read()?;
        Ok(self.records.lock().unwrap().get(search_term).cloned())
    }

    fn count(&self) -> Result<u64, TrendError> {
        self.check_read()?;
        Ok(self.records.lock().unwrap().len() as u64)
    }
}
