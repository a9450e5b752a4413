//! Persistent match history using SQLite (rusqlite)
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - SQLite database with schema versioning
//! - An append-only table of finished matches, used as the local stats sink

use crate::app::FinalStats;
use crate::stats::{MatchRecord, StatsSink};
use directories::ProjectDirs;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

/// Current schema version. Bump this when making schema changes.
const SCHEMA_VERSION: u32 = 1;

/// Separator for the found-word list column. Words are A-Z only.
const WORD_SEPARATOR: &str = " ";

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Database error from SQLite
    Database(rusqlite::Error),
    /// Could not determine data directory
    NoDataDirectory,
    /// Schema version mismatch (future version)
    FutureSchemaVersion { found: u32, supported: u32 },
    /// Failed to create data directory
    CreateDirFailed(std::io::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Database(e) => write!(f, "database error: {}", e),
            StorageError::NoDataDirectory => write!(f, "could not determine data directory"),
            StorageError::FutureSchemaVersion { found, supported } => {
                write!(
                    f,
                    "database schema version {} is newer than supported version {}",
                    found, supported
                )
            }
            StorageError::CreateDirFailed(e) => write!(f, "failed to create data directory: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e)
    }
}

/// The match history database.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open or create the database in the OS data directory.
    ///
    /// - Linux: `$XDG_DATA_HOME/wordfall/` or `~/.local/share/wordfall/`
    /// - macOS: `~/Library/Application Support/wordfall/`
    pub fn open() -> Result<Self, StorageError> {
        let data_dir = Self::data_dir()?;
        std::fs::create_dir_all(&data_dir).map_err(StorageError::CreateDirFailed)?;
        Self::open_at(&data_dir.join("wordfall.db"))
    }

    /// Open or create the database at an explicit path.
    pub fn open_at(db_path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        log::debug!("opened match history at {}", db_path.display());
        Ok(storage)
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let storage = Storage { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "wordfall")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    /// Append a finished match and return its record.
    pub fn record_match(&self, stats: &FinalStats) -> Result<MatchRecord, StorageError> {
        let recorded_at = now_millis();
        let words = stats.found_words.join(WORD_SEPARATOR);

        self.conn.execute(
            "INSERT INTO matches (final_score, highest_level, found_words, recorded_at) VALUES (?1, ?2, ?3, ?4)",
            params![stats.final_score as i64, stats.highest_level, words, recorded_at],
        )?;
        let match_id = self.conn.last_insert_rowid();
        log::debug!("recorded match {} ({} points)", match_id, stats.final_score);

        Ok(MatchRecord {
            match_id,
            stats: stats.clone(),
            recorded_at,
        })
    }

    /// All recorded matches, oldest first.
    pub fn matches(&self) -> Result<Vec<MatchRecord>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT match_id, final_score, highest_level, found_words, recorded_at FROM matches ORDER BY match_id",
        )?;

        let rows = stmt.query_map([], |row| {
            let match_id: i64 = row.get(0)?;
            let final_score: i64 = row.get(1)?;
            let highest_level: u32 = row.get(2)?;
            let words: String = row.get(3)?;
            let recorded_at: i64 = row.get(4)?;
            Ok((match_id, final_score, highest_level, words, recorded_at))
        })?;

        let mut matches = Vec::new();
        for row in rows {
            let (match_id, final_score, highest_level, words, recorded_at) = row?;
            matches.push(MatchRecord {
                match_id,
                stats: FinalStats {
                    final_score: final_score.max(0) as u64,
                    found_words: words
                        .split(WORD_SEPARATOR)
                        .filter(|w| !w.is_empty())
                        .map(str::to_string)
                        .collect(),
                    highest_level,
                },
                recorded_at,
            });
        }
        Ok(matches)
    }

    /// Get the total number of recorded matches.
    pub fn match_count(&self) -> Result<i64, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))?;
        Ok(count)
    }

    // Private helper methods

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            self.create_schema_v1()?;
        } else if current_version > SCHEMA_VERSION {
            // Database is from a newer version of wordfall
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version: u32 = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        Ok(version)
    }

    fn create_schema_v1(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            -- Meta table: stores schema version
            CREATE TABLE meta (
                schema_version INTEGER NOT NULL,
                created_at INTEGER NOT NULL
            );

            -- Finished matches, append-only
            CREATE TABLE matches (
                match_id INTEGER PRIMARY KEY AUTOINCREMENT,
                final_score INTEGER NOT NULL,
                highest_level INTEGER NOT NULL,
                found_words TEXT NOT NULL,
                recorded_at INTEGER NOT NULL
            );

            -- Index for chronological ordering
            CREATE INDEX idx_matches_recorded ON matches (recorded_at);
            "#,
        )?;

        self.conn.execute(
            "INSERT INTO meta (schema_version, created_at) VALUES (?1, ?2)",
            params![SCHEMA_VERSION, now_millis()],
        )?;

        Ok(())
    }
}

impl StatsSink for Storage {
    type Error = StorageError;

    fn submit(&mut self, stats: &FinalStats) -> Result<(), Self::Error> {
        self.record_match(stats).map(|_| ())
    }
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
