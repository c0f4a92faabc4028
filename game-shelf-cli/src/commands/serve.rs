use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::web::{self, AppState};

/// Run the HTTP server until interrupted.
pub(crate) fn run_serve(db_path: PathBuf, bind: String) -> Result<(), CliError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    // Create the schema once up front so requests never race on it
    game_shelf_db::open_database(&db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;

    log::info!(
        "{} http://{}",
        "Serving game catalog on".if_supports_color(Stdout, |t| t.bold()),
        bind,
    );
    log::info!("  Database: {}", db_path.display());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(web::serve(AppState::new(db_path), &bind))
}
