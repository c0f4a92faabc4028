//! Data model types for the game catalog.
//!
//! These types represent the persistent catalog schema: games, the genre
//! each game belongs to, and the platforms a game is associated with.

use serde::{Deserialize, Serialize};

/// Store-assigned game identifier.
pub type GameId = i64;
/// Genre identifier.
pub type GenreId = i64;
/// Platform identifier.
pub type PlatformId = i64;

// ── Genre ───────────────────────────────────────────────────────────────────

/// A genre a game belongs to. Loaded from YAML seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

// ── Platform ────────────────────────────────────────────────────────────────

/// A platform a game can be released on. Loaded from YAML seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub name: String,
}

// ── Game ────────────────────────────────────────────────────────────────────

/// A game record with whichever relations were eagerly loaded.
///
/// `genre` is only populated when the genre relation was requested.
/// `platforms` is always present; it is empty both for a game with no
/// platforms and for a load that did not request the platform relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub image: Option<String>,
    pub release_year: i32,
    pub genre_id: GenreId,
    /// Concurrency token. Bumped by every committed update.
    pub version: i64,
    pub genre: Option<Genre>,
    pub platforms: Vec<Platform>,
}

impl Game {
    /// Whether a platform with this id is in the game's platform list.
    pub fn has_platform(&self, platform_id: PlatformId) -> bool {
        self.platforms.iter().any(|p| p.id == platform_id)
    }

    /// Append a platform unless one with the same id is already present.
    ///
    /// Returns `true` if the list changed.
    pub fn add_platform(&mut self, platform: Platform) -> bool {
        if self.has_platform(platform.id) {
            return false;
        }
        self.platforms.push(platform);
        true
    }

    /// Remove the platform with this id, returning it if it was present.
    pub fn remove_platform(&mut self, platform_id: PlatformId) -> Option<Platform> {
        let pos = self.platforms.iter().position(|p| p.id == platform_id)?;
        Some(self.platforms.remove(pos))
    }
}

// ── Form payload ────────────────────────────────────────────────────────────

/// The bound create/edit payload.
///
/// Only these fields are ever read from a request; anything else a client
/// posts (platform lists, timestamps) is dropped during deserialization.
/// User-edited fields stay as raw strings so an invalid submission can be
/// echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameForm {
    pub id: Option<GameId>,
    pub name: String,
    pub image: String,
    pub release_year: String,
    pub genre_id: String,
    /// Concurrency token round-tripped through the edit form.
    pub version: Option<i64>,
}

impl GameForm {
    /// Prefill a form from a stored game.
    pub fn from_game(game: &Game) -> Self {
        Self {
            id: Some(game.id),
            name: game.name.clone(),
            image: game.image.clone().unwrap_or_default(),
            release_year: game.release_year.to_string(),
            genre_id: game.genre_id.to_string(),
            version: Some(game.version),
        }
    }
}
