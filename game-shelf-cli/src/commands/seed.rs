use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::default_catalog_dir;

/// Upsert genres and platforms from the YAML catalog into the database.
pub(crate) fn run_seed(db_path: &Path, catalog_dir: Option<PathBuf>) -> Result<(), CliError> {
    let catalog_dir = catalog_dir.unwrap_or_else(default_catalog_dir);
    if !catalog_dir.is_dir() {
        return Err(CliError::config(format!(
            "Catalog directory not found: {}",
            catalog_dir.display()
        )));
    }

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = game_shelf_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;

    let stats = game_shelf_db::seed_from_catalog(&conn, &catalog_dir)
        .map_err(|e| CliError::database(format!("Failed to seed catalog: {}", e)))?;

    log::info!(
        "{}",
        "Catalog seeded.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Source:    {}", catalog_dir.display());
    log::info!("  Database:  {}", db_path.display());
    log::info!(
        "  Genres:    {}",
        stats.genres.if_supports_color(Stdout, |t| t.green()),
    );
    log::info!(
        "  Platforms: {}",
        stats.platforms.if_supports_color(Stdout, |t| t.green()),
    );

    Ok(())
}
