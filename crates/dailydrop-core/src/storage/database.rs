//! SQLite-based persistence.
//!
//! Provides:
//! - A key-value store for the state blobs (daily reward state, player
//!   profile, challenge book)
//! - The `daily_claims` history table and its statistics queries

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::clock::LocalDay;
use crate::error::StorageError;

use super::data_dir;

/// One successful daily claim, as recorded in the history table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: i64,
    pub day: String,
    pub day_index: u8,
    pub streak: u8,
    pub coins: u32,
    pub claimed_at: DateTime<Utc>,
}

/// Aggregated claim statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClaimStats {
    pub total_claims: u64,
    pub total_coins: u64,
    pub best_streak: u8,
    pub claims_last_7_days: u64,
}

/// SQLite database for game state.
///
/// Stores state blobs in a kv table and every successful daily claim in
/// `daily_claims`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/dailydrop.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?
            .join("dailydrop.db");
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS daily_claims (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    day        TEXT NOT NULL,
                    day_index  INTEGER NOT NULL,
                    streak     INTEGER NOT NULL,
                    coins      INTEGER NOT NULL,
                    claimed_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_daily_claims_day ON daily_claims(day);",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Record a successful daily claim.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_claim(
        &self,
        day: LocalDay,
        day_index: u8,
        streak: u8,
        coins: u32,
        claimed_at: DateTime<Utc>,
    ) -> Result<i64, StorageError> {
        self.conn.execute(
            "INSERT INTO daily_claims (day, day_index, streak, coins, claimed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                day.to_string(),
                day_index,
                streak,
                coins,
                claimed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent claims, newest first.
    pub fn recent_claims(&self, limit: u32) -> Result<Vec<ClaimRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, day, day_index, streak, coins, claimed_at
             FROM daily_claims ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u32>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, day, day_index, streak, coins, claimed_at) = row?;
            let claimed_at = claimed_at
                .parse::<DateTime<Utc>>()
                .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
            records.push(ClaimRecord {
                id,
                day,
                day_index,
                streak,
                coins,
                claimed_at,
            });
        }
        Ok(records)
    }

    /// Claim statistics as of the given local day.
    pub fn claim_stats(&self, today: LocalDay) -> Result<ClaimStats, StorageError> {
        let mut stats = ClaimStats::default();

        let row = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(coins), 0), COALESCE(MAX(streak), 0)
             FROM daily_claims",
            [],
            |row| {
                Ok((
                    row.get::<_, u64>(0)?,
                    row.get::<_, u64>(1)?,
                    row.get::<_, u8>(2)?,
                ))
            },
        )?;
        stats.total_claims = row.0;
        stats.total_coins = row.1;
        stats.best_streak = row.2;

        // ISO day strings order lexicographically, so a string comparison
        // covers the trailing 7-day window.
        let cutoff = (today.date() - chrono::Duration::days(6))
            .format("%Y-%m-%d")
            .to_string();
        stats.claims_last_7_days = self.conn.query_row(
            "SELECT COUNT(*) FROM daily_claims WHERE day >= ?1",
            params![cutoff],
            |row| row.get::<_, u64>(0),
        )?;

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> LocalDay {
        LocalDay::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "replaced").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "replaced");
    }

    #[test]
    fn record_and_aggregate_claims() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_claim(day(2026, 8, 1), 1, 1, 120, now).unwrap();
        db.record_claim(day(2026, 8, 2), 2, 2, 210, now).unwrap();
        db.record_claim(day(2026, 8, 3), 3, 3, 95, now).unwrap();

        let stats = db.claim_stats(day(2026, 8, 3)).unwrap();
        assert_eq!(stats.total_claims, 3);
        assert_eq!(stats.total_coins, 425);
        assert_eq!(stats.best_streak, 3);
        assert_eq!(stats.claims_last_7_days, 3);
    }

    #[test]
    fn seven_day_window_excludes_old_claims() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_claim(day(2026, 7, 1), 1, 1, 100, now).unwrap();
        db.record_claim(day(2026, 8, 2), 1, 1, 100, now).unwrap();

        let stats = db.claim_stats(day(2026, 8, 3)).unwrap();
        assert_eq!(stats.total_claims, 2);
        assert_eq!(stats.claims_last_7_days, 1);
    }

    #[test]
    fn recent_claims_newest_first() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_claim(day(2026, 8, 1), 1, 1, 100, now).unwrap();
        db.record_claim(day(2026, 8, 2), 2, 2, 150, now).unwrap();

        let records = db.recent_claims(10).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].day, "2026-08-02");
        assert_eq!(records[1].day, "2026-08-01");
    }
}
