use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_lib::settings;
use game_shelf_lib::Settings;

use crate::CliError;

/// Show the resolved settings and the file they were read from.
pub(crate) fn run_config_show(settings: &Settings, db_path: &Path) -> Result<(), CliError> {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "game-shelf Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let db_source = if settings.database.path.is_some() {
        "settings file"
    } else {
        "default"
    };
    log::info!("  database.path = {} ({})", db_path.display(), db_source);

    let bind = settings.bind_address(None);
    let bind_source = if settings.server.bind.is_some() {
        "settings file"
    } else {
        "default"
    };
    log::info!("  server.bind   = {} ({})", bind, bind_source);

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        log::info!("{}", "Raw settings:".if_supports_color(Stdout, |t| t.bold()));
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }

    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    log::info!("{}", settings::settings_path().display());
    Ok(())
}

/// Save (or clear, when `path` is `None`) the database path in the settings file.
pub(crate) fn run_config_set_db(path: Option<PathBuf>) -> Result<(), CliError> {
    settings::save_database_path(path.as_deref())
        .map_err(|e| CliError::config(format!("Failed to write settings: {}", e)))?;
    match path {
        Some(p) => log::info!("Database path set to {}", p.display()),
        None => log::info!("Database path cleared; using the default location."),
    }
    Ok(())
}
