//! Request-scoped unit of work over a SQLite connection.

use std::collections::HashMap;
use std::path::Path;

use game_shelf_catalog::{
    CommitSummary, Game, GameDraft, GameId, Genre, Platform, PlatformId, Relations, StoreError,
    UnitOfWork,
};
use rusqlite::Connection;

use crate::operations::{self, OperationError};
use crate::queries;
use crate::schema::{self, SchemaError};

/// A change recorded by a `stage_*` call, applied on commit.
#[derive(Debug, Clone)]
enum StagedChange {
    Insert(GameDraft),
    Update(GameId, GameDraft),
    Remove(GameId),
    Attach(GameId, PlatformId),
    Detach(GameId, PlatformId),
}

/// One SQLite connection plus the changes staged against it.
///
/// Create one per request and drop it when the request is done.
pub struct SqliteSession {
    conn: Connection,
    staged: Vec<StagedChange>,
    commits: usize,
}

impl SqliteSession {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            staged: Vec::new(),
            commits: 0,
        }
    }

    /// Open (creating the schema if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self::new(schema::open_database(path)?))
    }

    /// A session over a fresh in-memory database. Useful for testing.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self::new(schema::open_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Number of `commit` calls issued on this session, successful or not.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Number of changes waiting for the next commit.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    fn attach_relations(&self, game: &mut Game, relations: Relations) -> Result<(), StoreError> {
        if relations.genre {
            game.genre = queries::find_genre(&self.conn, game.genre_id)?;
        }
        if relations.platforms {
            game.platforms = queries::platforms_for_game(&self.conn, game.id)?;
        }
        Ok(())
    }

    fn apply(
        conn: &Connection,
        change: &StagedChange,
        summary: &mut CommitSummary,
    ) -> Result<(), StoreError> {
        match change {
            StagedChange::Insert(draft) => {
                let id = operations::insert_game(conn, draft)?;
                log::debug!("Inserted game {} '{}'", id, draft.name);
                summary.inserted.push(id);
            }
            StagedChange::Update(id, draft) => {
                if !operations::update_game(conn, *id, draft)? {
                    log::warn!(
                        "Update of game {} matched no row (expected version {:?})",
                        id,
                        draft.version
                    );
                    return Err(StoreError::Conflict { game_id: *id });
                }
                summary.updated += 1;
            }
            StagedChange::Remove(id) => {
                if operations::delete_game(conn, *id)? {
                    summary.removed += 1;
                } else {
                    log::debug!("Game {} was already gone at commit", id);
                }
            }
            StagedChange::Attach(game_id, platform_id) => {
                if operations::attach_platform(conn, *game_id, *platform_id)? {
                    summary.attached += 1;
                } else {
                    log::debug!(
                        "Platform {} was already linked to game {}",
                        platform_id,
                        game_id
                    );
                }
            }
            StagedChange::Detach(game_id, platform_id) => {
                if operations::detach_platform(conn, *game_id, *platform_id)? {
                    summary.detached += 1;
                }
            }
        }
        Ok(())
    }
}

fn sqlite(e: rusqlite::Error) -> StoreError {
    OperationError::from(e).into()
}

impl UnitOfWork for SqliteSession {
    fn list_games(&mut self, relations: Relations) -> Result<Vec<Game>, StoreError> {
        let mut games = queries::list_games(&self.conn)?;

        if relations.genre {
            let genres: HashMap<_, Genre> = queries::list_genres(&self.conn)?
                .into_iter()
                .map(|g| (g.id, g))
                .collect();
            for game in &mut games {
                game.genre = genres.get(&game.genre_id).cloned();
            }
        }
        if relations.platforms {
            let mut by_game = queries::platforms_by_game(&self.conn)?;
            for game in &mut games {
                game.platforms = by_game.remove(&game.id).unwrap_or_default();
            }
        }

        Ok(games)
    }

    fn find_game(
        &mut self,
        id: GameId,
        relations: Relations,
    ) -> Result<Option<Game>, StoreError> {
        let Some(mut game) = queries::find_game(&self.conn, id)? else {
            return Ok(None);
        };
        self.attach_relations(&mut game, relations)?;
        Ok(Some(game))
    }

    fn game_exists(&mut self, id: GameId) -> Result<bool, StoreError> {
        Ok(queries::game_exists(&self.conn, id)?)
    }

    fn genres(&mut self) -> Result<Vec<Genre>, StoreError> {
        Ok(queries::list_genres(&self.conn)?)
    }

    fn platforms_by_name(&mut self) -> Result<Vec<Platform>, StoreError> {
        Ok(queries::list_platforms_by_name(&self.conn)?)
    }

    fn find_platform(&mut self, id: PlatformId) -> Result<Option<Platform>, StoreError> {
        Ok(queries::find_platform(&self.conn, id)?)
    }

    fn stage_insert(&mut self, draft: GameDraft) {
        self.staged.push(StagedChange::Insert(draft));
    }

    fn stage_update(&mut self, id: GameId, draft: GameDraft) {
        self.staged.push(StagedChange::Update(id, draft));
    }

    fn stage_remove(&mut self, id: GameId) {
        self.staged.push(StagedChange::Remove(id));
    }

    fn stage_attach_platform(&mut self, game_id: GameId, platform_id: PlatformId) {
        self.staged.push(StagedChange::Attach(game_id, platform_id));
    }

    fn stage_detach_platform(&mut self, game_id: GameId, platform_id: PlatformId) {
        self.staged.push(StagedChange::Detach(game_id, platform_id));
    }

    fn commit(&mut self) -> Result<CommitSummary, StoreError> {
        self.commits += 1;
        let staged = std::mem::take(&mut self.staged);
        log::debug!("Committing {} staged change(s)", staged.len());

        let tx = self.conn.transaction().map_err(sqlite)?;
        let mut summary = CommitSummary::default();
        for change in &staged {
            // Dropping `tx` on the error path rolls everything back.
            Self::apply(&tx, change, &mut summary)?;
        }
        tx.commit().map_err(sqlite)?;

        Ok(summary)
    }
}
