use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::api::ReportData;

/// Lifetime of a stored access token, in seconds
pub const SESSION_TTL_SECS: i64 = 60 * 60;

pub struct CacheDb {
    conn: Connection,
}

impl CacheDb {
    pub fn new() -> Result<Self> {
        let cache_dir = Self::get_cache_dir();
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir {}", cache_dir.display()))?;

        Self::open(&cache_dir.join("cache.db"))
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open cache {}", db_path.display()))?;

        let mut cache = CacheDb { conn };
        cache.init_schema()?;

        Ok(cache)
    }

    pub fn in_memory() -> Result<Self> {
        let mut cache = CacheDb {
            conn: Connection::open_in_memory()?,
        };
        cache.init_schema()?;
        Ok(cache)
    }

    fn get_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .map(|dir| dir.join("sentui"))
            .unwrap_or_else(crate::utils::get_cache_fallback_path)
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS session (
                slot INTEGER PRIMARY KEY CHECK (slot = 0),
                token TEXT NOT NULL,
                expires_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS report_cache (
                report_id TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                fetched_at INTEGER NOT NULL
            ) WITHOUT ROWID;
            ",
        )?;

        Ok(())
    }

    // Session token
    pub fn save_token(&self, token: &str) -> Result<()> {
        self.save_token_with_ttl(token, SESSION_TTL_SECS)
    }

    pub fn save_token_with_ttl(&self, token: &str, ttl_secs: i64) -> Result<()> {
        let expires_at = chrono::Utc::now().timestamp() + ttl_secs;
        self.conn.execute(
            "INSERT OR REPLACE INTO session (slot, token, expires_at) VALUES (0, ?1, ?2)",
            params![token, expires_at],
        )?;
        Ok(())
    }

    /// Stored token if it has not expired; expired tokens are removed
    pub fn load_token(&self) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT token, expires_at FROM session WHERE slot = 0",
            [],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        );

        match result {
            Ok((token, expires_at)) if expires_at > chrono::Utc::now().timestamp() => {
                Ok(Some(token))
            }
            Ok(_) => {
                self.clear_token()?;
                Ok(None)
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn clear_token(&self) -> Result<()> {
        self.conn.execute("DELETE FROM session", [])?;
        Ok(())
    }

    // Report JSON caching
    pub fn save_report(&self, report: &ReportData) -> Result<()> {
        let body = serde_json::to_string(report)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO report_cache (report_id, body, fetched_at)
             VALUES (?1, ?2, ?3)",
            params![&report.id, body, chrono::Utc::now().timestamp()],
        )?;
        Ok(())
    }

    pub fn get_report(&self, report_id: &str) -> Result<Option<ReportData>> {
        let result = self.conn.query_row(
            "SELECT body FROM report_cache WHERE report_id = ?1",
            params![report_id],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(report) => Ok(Some(report)),
                Err(e) => {
                    tracing::warn!("Dropping unreadable cached report {}: {}", report_id, e);
                    self.remove_report(report_id)?;
                    Ok(None)
                }
            },
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn remove_report(&self, report_id: &str) -> Result<()> {
        self.conn.execute(
            "DELETE FROM report_cache WHERE report_id = ?1",
            params![report_id],
        )?;
        Ok(())
    }

    pub fn clear_reports(&self) -> Result<()> {
        self.conn.execute("DELETE FROM report_cache", [])?;
        Ok(())
    }
}
