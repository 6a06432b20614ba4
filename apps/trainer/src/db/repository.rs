//! Repository pattern for database access.

use crate::db::error::DbError;
use chrono::{DateTime, NaiveDate, Utc};
use deutschsprint_core::{LeitnerBox, ProgressStats, RecordStore, ReviewRecord, UserSettings};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::path::Path;

type Result<T> = std::result::Result<T, DbError>;

/// Repository for user settings.
pub trait SettingsRepository {
    fn get_settings(&self) -> Result<UserSettings>;
    fn save_settings(&self, settings: &UserSettings) -> Result<()>;
}

/// Repository for progress counters.
pub trait ProgressRepository {
    fn get_progress(&self) -> Result<ProgressStats>;
    fn save_progress(&self, progress: &ProgressStats) -> Result<()>;
}

/// SQLite implementation of repositories.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open database at path, creating if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    /// Open in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self { conn };
        repo.initialize()?;
        Ok(repo)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(super::schema::SCHEMA)?;
        self.conn.execute_batch(super::schema::INIT_SINGLETONS)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![super::schema::SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Clear review records, settings and progress in one transaction.
    pub fn reset_all(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM review_records", [])?;
        tx.execute("DELETE FROM user_settings", [])?;
        tx.execute("DELETE FROM progress", [])?;
        tx.execute_batch(super::schema::INIT_SINGLETONS)?;
        tx.commit()?;
        Ok(())
    }

    /// Run `f` inside one transaction. Commits on `Ok`, rolls back on `Err`.
    /// Uses plain statements so `f` can take `&mut self`.
    pub fn atomically<T, E, F>(&mut self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
        E: From<DbError>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE").map_err(DbError::from)?;

        let outcome = f(self).and_then(|value| {
            self.conn.execute_batch("COMMIT").map_err(DbError::from)?;
            Ok(value)
        });
        if outcome.is_err() && !self.conn.is_autocommit() {
            if let Err(e) = self.conn.execute_batch("ROLLBACK") {
                tracing::warn!(error = %e, "rollback failed");
            }
        }
        outcome
    }

    /// Number of stored review records.
    pub fn record_count(&self) -> Result<usize> {
        self.conn
            .query_row("SELECT COUNT(*) FROM review_records", [], |row| row.get(0))
            .map_err(Into::into)
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::InvalidData(format!("bad timestamp {value:?}: {e}")))
}

/// Raw row, validated into a `ReviewRecord` outside the rusqlite closure.
struct RecordRow {
    item_id: String,
    leitner_box: u8,
    last_reviewed_at: String,
    next_due_at: String,
    success_streak: u32,
}

impl RecordRow {
    const COLUMNS: &'static str = "item_id, box, last_reviewed_at, next_due_at, success_streak";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            item_id: row.get(0)?,
            leitner_box: row.get(1)?,
            last_reviewed_at: row.get(2)?,
            next_due_at: row.get(3)?,
            success_streak: row.get(4)?,
        })
    }

    fn into_record(self) -> Result<ReviewRecord> {
        let leitner_box = LeitnerBox::new(self.leitner_box)
            .map_err(|e| DbError::InvalidData(format!("record {}: {e}", self.item_id)))?;
        Ok(ReviewRecord {
            leitner_box,
            last_reviewed_at: parse_timestamp(&self.last_reviewed_at)?,
            next_due_at: parse_timestamp(&self.next_due_at)?,
            success_streak: self.success_streak,
            item_id: self.item_id,
        })
    }
}

impl RecordStore for SqliteRepository {
    type Error = DbError;

    fn get(&self, item_id: &str) -> Result<Option<ReviewRecord>> {
        let sql = format!("SELECT {} FROM review_records WHERE item_id = ?1", RecordRow::COLUMNS);
        self.conn
            .query_row(&sql, params![item_id], RecordRow::from_row)
            .optional()?
            .map(RecordRow::into_record)
            .transpose()
    }

    fn set(&mut self, record: ReviewRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO review_records (item_id, box, last_reviewed_at, next_due_at, success_streak) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.item_id,
                record.leitner_box.value(),
                record.last_reviewed_at.to_rfc3339(),
                record.next_due_at.to_rfc3339(),
                record.success_streak,
            ],
        )?;
        Ok(())
    }

    fn get_all(&self) -> Result<HashMap<String, ReviewRecord>> {
        let sql = format!("SELECT {} FROM review_records", RecordRow::COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], RecordRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|row| row.into_record().map(|r| (r.item_id.clone(), r)))
            .collect()
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM review_records", [])?;
        Ok(())
    }
}

impl SettingsRepository for SqliteRepository {
    fn get_settings(&self) -> Result<UserSettings> {
        let payload: String = self.conn.query_row(
            "SELECT payload FROM user_settings WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        serde_json::from_str(&payload).map_err(Into::into)
    }

    fn save_settings(&self, settings: &UserSettings) -> Result<()> {
        let payload = serde_json::to_string(settings)?;
        self.conn.execute(
            "UPDATE user_settings SET payload = ?1 WHERE id = 1",
            params![payload],
        )?;
        Ok(())
    }
}

impl ProgressRepository for SqliteRepository {
    fn get_progress(&self) -> Result<ProgressStats> {
        let (streak, words_learned, total_reviews, last_review_date) = self.conn.query_row(
            "SELECT streak, words_learned, total_reviews, last_review_date FROM progress WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, u32>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            },
        )?;

        let last_review_date = last_review_date
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                    .map_err(|e| DbError::InvalidData(format!("bad date {s:?}: {e}")))
            })
            .transpose()?;

        Ok(ProgressStats {
            streak,
            words_learned,
            total_reviews,
            last_review_date,
        })
    }

    fn save_progress(&self, progress: &ProgressStats) -> Result<()> {
        let date_str = progress
            .last_review_date
            .map(|d| d.format("%Y-%m-%d").to_string());

        self.conn.execute(
            "UPDATE progress SET streak = ?1, words_learned = ?2, total_reviews = ?3, last_review_date = ?4 WHERE id = 1",
            params![
                progress.streak,
                progress.words_learned,
                progress.total_reviews,
                date_str,
            ],
        )?;
        Ok(())
    }
}
