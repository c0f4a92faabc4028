//! Catalog database schema.
//!
//! The layout version lives in SQLite's `user_version` header field. A fresh
//! file (version 0) gets the full schema; a file written by a newer build is
//! refused rather than guessed at.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unsupported catalog schema version {found} (this build understands {supported})")]
    UnsupportedVersion { supported: i32, found: i32 },
}

/// Schema layout written by this build.
pub const SCHEMA_VERSION: i32 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the catalog database at `path`, creating the schema on first use.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Create every table and index that is missing, then stamp the version.
///
/// Safe to run against a database that already has the schema.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    Ok(())
}

/// The stamped layout version; 0 for a database that has never been set up.
pub fn schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

fn ensure_schema(conn: &Connection) -> Result<(), SchemaError> {
    match schema_version(conn)? {
        0 => {
            log::debug!("Creating catalog schema version {}", SCHEMA_VERSION);
            create_schema(conn)
        }
        SCHEMA_VERSION => Ok(()),
        found => Err(SchemaError::UnsupportedVersion {
            supported: SCHEMA_VERSION,
            found,
        }),
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS genres (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS platforms (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- version is the optimistic-concurrency token, bumped on every update
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    image TEXT,
    release_year INTEGER NOT NULL,
    genre_id INTEGER NOT NULL REFERENCES genres(id),
    version INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
CREATE INDEX IF NOT EXISTS idx_games_genre ON games(genre_id);

CREATE TABLE IF NOT EXISTS game_platforms (
    game_id INTEGER NOT NULL REFERENCES games(id) ON DELETE CASCADE,
    platform_id INTEGER NOT NULL REFERENCES platforms(id),
    PRIMARY KEY (game_id, platform_id)
);
CREATE INDEX IF NOT EXISTS idx_game_platforms_platform ON game_platforms(platform_id);
"#;
