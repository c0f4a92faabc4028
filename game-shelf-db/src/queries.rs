//! Read queries for the catalog database.
//!
//! Provides game lookup and listing, genre/platform listing, and statistics.

use std::collections::HashMap;

use game_shelf_catalog::{Game, GameId, Genre, GenreId, Platform, PlatformId};
use rusqlite::{params, Connection};

use crate::operations::OperationError;

// ── Game Lookups ────────────────────────────────────────────────────────────

/// List all games (without relations), ordered by id.
pub fn list_games(conn: &Connection) -> Result<Vec<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, image, release_year, genre_id, version
         FROM games ORDER BY id",
    )?;
    let rows = stmt.query_map([], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Find a game by id (without relations).
pub fn find_game(conn: &Connection, id: GameId) -> Result<Option<Game>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, image, release_year, genre_id, version
         FROM games WHERE id = ?1",
    )?;
    match stmt.query_row(params![id], row_to_game) {
        Ok(g) => Ok(Some(g)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Whether a game with this id exists.
pub fn game_exists(conn: &Connection, id: GameId) -> Result<bool, OperationError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM games WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ── Genre Queries ───────────────────────────────────────────────────────────

/// List all genres, ordered by name.
pub fn list_genres(conn: &Connection) -> Result<Vec<Genre>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name FROM genres ORDER BY name, id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Genre {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_genre(conn: &Connection, id: GenreId) -> Result<Option<Genre>, OperationError> {
    let result = conn.query_row(
        "SELECT id, name FROM genres WHERE id = ?1",
        params![id],
        |row| {
            Ok(Genre {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    );
    match result {
        Ok(g) => Ok(Some(g)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Platform Queries ────────────────────────────────────────────────────────

/// List all platforms, ordered by name ascending.
pub fn list_platforms_by_name(conn: &Connection) -> Result<Vec<Platform>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, name FROM platforms ORDER BY name, id")?;
    let rows = stmt.query_map([], row_to_platform)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn find_platform(
    conn: &Connection,
    id: PlatformId,
) -> Result<Option<Platform>, OperationError> {
    let result = conn.query_row(
        "SELECT id, name FROM platforms WHERE id = ?1",
        params![id],
        row_to_platform,
    );
    match result {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Platforms linked to one game, in the order they were linked.
pub fn platforms_for_game(
    conn: &Connection,
    game_id: GameId,
) -> Result<Vec<Platform>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name
         FROM game_platforms gp JOIN platforms p ON p.id = gp.platform_id
         WHERE gp.game_id = ?1
         ORDER BY gp.rowid",
    )?;
    let rows = stmt.query_map(params![game_id], row_to_platform)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Platforms for every game that has any, keyed by game id.
pub fn platforms_by_game(
    conn: &Connection,
) -> Result<HashMap<GameId, Vec<Platform>>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT gp.game_id, p.id, p.name
         FROM game_platforms gp JOIN platforms p ON p.id = gp.platform_id
         ORDER BY gp.game_id, gp.rowid",
    )?;
    let mut rows = stmt.query([])?;
    let mut map: HashMap<GameId, Vec<Platform>> = HashMap::new();
    while let Some(row) = rows.next()? {
        let game_id: GameId = row.get(0)?;
        map.entry(game_id).or_default().push(Platform {
            id: row.get(1)?,
            name: row.get(2)?,
        });
    }
    Ok(map)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    let genres: i64 = conn.query_row("SELECT COUNT(*) FROM genres", [], |r| r.get(0))?;
    let platforms: i64 = conn.query_row("SELECT COUNT(*) FROM platforms", [], |r| r.get(0))?;
    let platform_links: i64 =
        conn.query_row("SELECT COUNT(*) FROM game_platforms", [], |r| r.get(0))?;

    Ok(CatalogStats {
        games,
        genres,
        platforms,
        platform_links,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug)]
pub struct CatalogStats {
    pub games: i64,
    pub genres: i64,
    pub platforms: i64,
    pub platform_links: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        name: row.get(1)?,
        image: row.get(2)?,
        release_year: row.get(3)?,
        genre_id: row.get(4)?,
        version: row.get(5)?,
        genre: None,
        platforms: Vec::new(),
    })
}

fn row_to_platform(row: &rusqlite::Row<'_>) -> rusqlite::Result<Platform> {
    Ok(Platform {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
