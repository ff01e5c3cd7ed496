//! SQLite-backed trend store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{TrendError, TrendRecord, TrendStore};
use crate::catalog::{poster_url, Movie};

const SELECT_COLUMNS: &str =
    "id, search_term, count, movie_id, poster_url, created_at, updated_at";

/// SQLite-backed trend store.
///
/// Uniqueness of `search_term` is enforced by the schema, and counting is a
/// single upsert statement, so concurrent recorders can neither duplicate a
/// term nor lose an increment.
pub struct SqliteTrendStore {
    conn: Mutex<Connection>,
    image_base_url: String,
}

impl SqliteTrendStore {
    /// Create a new SQLite trend store, creating the database file and tables if needed.
    pub fn new(path: &Path, image_base_url: impl Into<String>) -> Result<Self, TrendError> {
        let conn = Connection::open(path).map_err(|e| TrendError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            image_base_url: image_base_url.into(),
        })
    }

    /// Create an in-memory SQLite trend store (useful for testing).
    pub fn in_memory(image_base_url: impl Into<String>) -> Result<Self, TrendError> {
        let conn = Connection::open_in_memory().map_err(|e| TrendError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            image_base_url: image_base_url.into(),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TrendError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS search_trends (
                id TEXT PRIMARY KEY,
                search_term TEXT NOT NULL UNIQUE,
                count INTEGER NOT NULL DEFAULT 1 CHECK (count >= 1),
                movie_id INTEGER NOT NULL,
                poster_url TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_search_trends_count ON search_trends(count DESC);
            "#,
        )
        .map_err(|e| TrendError::Database(e.to_string()))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TrendError> {
        self.conn
            .lock()
            .map_err(|_| TrendError::Database("connection lock poisoned".to_string()))
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<TrendRecord> {
        let count: i64 = row.get(2)?;
        let created_at_str: String = row.get(5)?;
        let updated_at_str: String = row.get(6)?;

        Ok(TrendRecord {
            id: row.get(0)?,
            search_term: row.get(1)?,
            count: count.max(1) as u64,
            movie_id: row.get(3)?,
            poster_url: row.get(4)?,
            created_at: parse_timestamp(&created_at_str),
            updated_at: parse_timestamp(&updated_at_str),
        })
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl TrendStore for SqliteTrendStore {
    fn record_search(&self, search_term: &str, movie: &Movie) -> Result<TrendRecord, TrendError> {
        let conn = self.conn().map_err(|e| TrendError::Write(e.to_string()))?;
        let now = Utc::now().to_rfc3339();
        let poster = movie
            .poster_path
            .as_deref()
            .map(|path| poster_url(&self.image_base_url, path));

        let sql = format!(
            "INSERT INTO search_trends (id, search_term, count, movie_id, poster_url, created_at, updated_at)
             VALUES (?1, ?2, 1, ?3, ?4, ?5, ?5)
             ON CONFLICT(search_term) DO UPDATE SET
                count = count + 1,
                updated_at = excluded.updated_at
             RETURNING {}",
            SELECT_COLUMNS
        );

        conn.query_row(
            &sql,
            params![
                Uuid::new_v4().to_string(),
                search_term,
                movie.id,
                poster,
                now
            ],
            Self::row_to_record,
        )
        .map_err(|e| TrendError::Write(e.to_string()))
    }

    fn top(&self, limit: u32) -> Result<Vec<TrendRecord>, TrendError> {
        let conn = self.conn().map_err(|e| TrendError::Read(e.to_string()))?;

        let sql = format!(
            "SELECT {} FROM search_trends
             ORDER BY count DESC, updated_at DESC, search_term ASC
             LIMIT ?",
            SELECT_COLUMNS
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| TrendError::Read(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit], Self::row_to_record)
            .map_err(|e| TrendError::Read(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| TrendError::Read(e.to_string()))?);
        }
        Ok(records)
    }

    fn get(&self, search_term: &str) -> Result<Option<TrendRecord>, TrendError> {
        let conn = self.conn().map_err(|e| TrendError::Read(e.to_string()))?;

        let sql = format!(
            "SELECT {} FROM search_trends WHERE search_term = ?",
            SELECT_COLUMNS
        );

        conn.query_row(&sql, params![search_term], Self::row_to_record)
            .optional()
            .map_err(|e| TrendError::Read(e.to_string()))
    }

    fn count(&self) -> Result<u64, TrendError> {
        let conn = self.conn().map_err(|e| TrendError::Read(e.to_string()))?;

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM search_trends", [], |row| row.get(0))
            .map_err(|e| TrendError::Read(e.to_string()))?;

        Ok(count.max(0) as u64)
    }
}
