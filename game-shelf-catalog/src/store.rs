//! The entity-store contract the request handlers run against.
//!
//! A [`UnitOfWork`] is a request-scoped session: reads go straight to the
//! store, writes are staged and only reach storage on [`UnitOfWork::commit`],
//! which applies everything staged so far atomically.

use thiserror::Error;

use crate::types::{Game, GameId, Genre, Platform, PlatformId};
use crate::validation::GameDraft;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Any failure of the storage engine itself.
    #[error("Storage error: {0}")]
    Backend(String),
    /// A staged update targeted a game that changed or vanished since it was loaded.
    #[error("Concurrency conflict on game {game_id}")]
    Conflict { game_id: GameId },
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Which relations to eagerly attach when loading games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Relations {
    pub genre: bool,
    pub platforms: bool,
}

impl Relations {
    pub const NONE: Self = Self {
        genre: false,
        platforms: false,
    };
    pub const GENRE: Self = Self {
        genre: true,
        platforms: false,
    };
    pub const PLATFORMS: Self = Self {
        genre: false,
        platforms: true,
    };
    pub const ALL: Self = Self {
        genre: true,
        platforms: true,
    };
}

/// What a successful commit wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitSummary {
    /// Ids assigned to staged inserts, in staging order.
    pub inserted: Vec<GameId>,
    pub updated: usize,
    pub removed: usize,
    pub attached: usize,
    pub detached: usize,
}

impl CommitSummary {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
            && self.updated == 0
            && self.removed == 0
            && self.attached == 0
            && self.detached == 0
    }
}

/// Request-scoped session over the Game/Genre/Platform store.
pub trait UnitOfWork {
    /// Every game, ordered by id, with the requested relations attached.
    fn list_games(&mut self, relations: Relations) -> Result<Vec<Game>, StoreError>;

    /// A single game by id, with the requested relations attached.
    fn find_game(&mut self, id: GameId, relations: Relations)
    -> Result<Option<Game>, StoreError>;

    /// Whether a game with this id currently exists in storage.
    fn game_exists(&mut self, id: GameId) -> Result<bool, StoreError>;

    /// Every genre, ordered by name.
    fn genres(&mut self) -> Result<Vec<Genre>, StoreError>;

    /// Every platform, ordered by name ascending.
    fn platforms_by_name(&mut self) -> Result<Vec<Platform>, StoreError>;

    fn find_platform(&mut self, id: PlatformId) -> Result<Option<Platform>, StoreError>;

    fn stage_insert(&mut self, draft: GameDraft);

    /// Stage an update of game `id`. When `draft.version` is set the update
    /// only applies if the stored version still matches it.
    fn stage_update(&mut self, id: GameId, draft: GameDraft);

    fn stage_remove(&mut self, id: GameId);

    fn stage_attach_platform(&mut self, game_id: GameId, platform_id: PlatformId);

    fn stage_detach_platform(&mut self, game_id: GameId, platform_id: PlatformId);

    /// Apply every staged change atomically and clear the stage.
    ///
    /// Fails with [`StoreError::Conflict`] (writing nothing) if a staged
    /// update no longer matches its row.
    fn commit(&mut self) -> Result<CommitSummary, StoreError>;
}
