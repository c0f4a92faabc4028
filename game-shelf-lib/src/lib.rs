//! Request handlers for the game catalog, their view models, and the shared
//! settings used by every frontend.

pub mod error;
pub mod handler;
pub mod settings;
pub mod views;

pub use error::{HandlerError, HandlerResult};
pub use settings::Settings;
pub use views::{CreatePage, EditPage, Outcome, Page, Route, SelectOption};

pub use game_shelf_catalog as catalog;
