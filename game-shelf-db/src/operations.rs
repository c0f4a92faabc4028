//! Write operations for games, their platform links, and seed data.

use game_shelf_catalog::{GameDraft, GameId, Genre, Platform, PlatformId, StoreError};
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Seed data error: {0}")]
    Seed(#[from] game_shelf_catalog::YamlError),
}

impl From<OperationError> for StoreError {
    fn from(e: OperationError) -> Self {
        StoreError::backend(e.to_string())
    }
}

// ── Genre / Platform Operations ─────────────────────────────────────────────

/// Insert or update a genre.
pub fn upsert_genre(conn: &Connection, genre: &Genre) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO genres (id, name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        params![genre.id, genre.name],
    )?;
    Ok(())
}

/// Insert or update a platform.
pub fn upsert_platform(conn: &Connection, platform: &Platform) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO platforms (id, name) VALUES (?1, ?2)
         ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        params![platform.id, platform.name],
    )?;
    Ok(())
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game. Returns the generated ID.
///
/// Any id carried by the draft is ignored; the database assigns one.
pub fn insert_game(conn: &Connection, draft: &GameDraft) -> Result<GameId, OperationError> {
    conn.execute(
        "INSERT INTO games (name, image, release_year, genre_id) VALUES (?1, ?2, ?3, ?4)",
        params![draft.name, draft.image, draft.release_year, draft.genre_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update a game's editable fields and bump its version.
///
/// When `draft.version` is set the row must still carry that version.
/// Returns `false` if no row matched (gone, or changed since it was read).
pub fn update_game(
    conn: &Connection,
    id: GameId,
    draft: &GameDraft,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "UPDATE games SET
             name = ?2,
             image = ?3,
             release_year = ?4,
             genre_id = ?5,
             version = version + 1,
             updated_at = datetime('now')
         WHERE id = ?1 AND (?6 IS NULL OR version = ?6)",
        params![
            id,
            draft.name,
            draft.image,
            draft.release_year,
            draft.genre_id,
            draft.version,
        ],
    )?;
    Ok(changed > 0)
}

/// Delete a game and its platform links. Returns `false` if it did not exist.
pub fn delete_game(conn: &Connection, id: GameId) -> Result<bool, OperationError> {
    let changed = conn.execute("DELETE FROM games WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

// ── Game ↔ Platform Links ───────────────────────────────────────────────────

/// Link a platform to a game. Returns `false` if the link already existed.
pub fn attach_platform(
    conn: &Connection,
    game_id: GameId,
    platform_id: PlatformId,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "INSERT INTO game_platforms (game_id, platform_id) VALUES (?1, ?2)
         ON CONFLICT(game_id, platform_id) DO NOTHING",
        params![game_id, platform_id],
    )?;
    Ok(changed > 0)
}

/// Unlink a platform from a game. Returns `false` if there was no link.
pub fn detach_platform(
    conn: &Connection,
    game_id: GameId,
    platform_id: PlatformId,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "DELETE FROM game_platforms WHERE game_id = ?1 AND platform_id = ?2",
        params![game_id, platform_id],
    )?;
    Ok(changed > 0)
}

// ── Seed Loading ────────────────────────────────────────────────────────────

/// Load all YAML seed data into the database.
///
/// Loads genres and platforms from the catalog directory. Safe to call
/// repeatedly (uses upsert).
pub fn seed_from_catalog(
    conn: &Connection,
    catalog_dir: &std::path::Path,
) -> Result<SeedStats, OperationError> {
    let (genres, platforms) = game_shelf_catalog::load_catalog(catalog_dir)?;

    let mut stats = SeedStats::default();

    for genre in &genres {
        upsert_genre(conn, genre)?;
        stats.genres += 1;
    }

    for platform in &platforms {
        upsert_platform(conn, platform)?;
        stats.platforms += 1;
    }

    log::debug!(
        "Seeded {} genres and {} platforms from {}",
        stats.genres,
        stats.platforms,
        catalog_dir.display()
    );

    Ok(stats)
}

/// Statistics from seeding the database.
#[derive(Debug, Default)]
pub struct SeedStats {
    pub genres: usize,
    pub platforms: usize,
}
