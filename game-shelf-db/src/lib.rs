//! SQLite persistence layer for the game catalog.
//!
//! Provides schema creation, CRUD operations, read queries, and
//! [`SqliteSession`], the request-scoped unit of work the handlers use.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod session;

pub use operations::{
    attach_platform, delete_game, detach_platform, insert_game, seed_from_catalog, update_game,
    upsert_genre, upsert_platform, OperationError, SeedStats,
};
pub use queries::{
    catalog_stats, find_game, find_genre, find_platform, game_exists, list_games, list_genres,
    list_platforms_by_name, platforms_for_game, platforms_by_game, CatalogStats,
};
pub use schema::{open_database, open_memory, SchemaError};
pub use session::SqliteSession;
