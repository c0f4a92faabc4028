use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'game-shelf seed' to create one.");
        return Ok(());
    }

    let conn = game_shelf_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))?;

    let stats = game_shelf_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Games:          {:>8}", stats.games);
    log::info!("  Genres:         {:>8}", stats.genres);
    log::info!("  Platforms:      {:>8}", stats.platforms);
    log::info!("  Platform links: {:>8}", stats.platform_links);

    Ok(())
}
