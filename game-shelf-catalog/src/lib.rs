//! Game catalog data model, form validation, the entity-store contract, and
//! YAML seed loading.
//!
//! This crate defines the catalog model without any database dependencies.
//! `game-shelf-db` implements [`store::UnitOfWork`] on top of SQLite and
//! `game-shelf-lib` drives it from the request handlers.

pub mod store;
pub mod types;
pub mod validation;
pub mod yaml;

pub use store::{CommitSummary, Relations, StoreError, UnitOfWork};
pub use types::*;
pub use validation::{FieldError, GameDraft, ValidationErrors};
pub use yaml::{load_catalog, load_genres, load_platforms, CatalogData, YamlError};
