use game_shelf_catalog::{GameId, StoreError};
use thiserror::Error;

/// Errors a catalog handler can end with.
///
/// Validation failures are not here: handlers recover from them by
/// re-rendering the submitted form.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The request carried no identifier
    #[error("{entity} not found: no id given")]
    MissingId { entity: &'static str },

    /// No entity with this identifier exists
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The game changed under an edit and still exists
    #[error("Game {game_id} was modified by someone else")]
    Conflict { game_id: GameId },

    /// Storage failure, propagated untouched
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HandlerError {
    pub fn game_not_found(id: GameId) -> Self {
        Self::NotFound {
            entity: "Game",
            id,
        }
    }

    /// Whether this error means "nothing there" (404).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MissingId { .. } | Self::NotFound { .. })
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
