//! Shared application settings (database path, bind address, config file location).
//!
//! The settings file is always `~/.config/game-shelf/settings.toml`. Every
//! value resolves through the same priority chain: command-line override,
//! then the settings file, then a built-in default.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Address the HTTP server binds when nothing else is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("Invalid settings in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Contents of `settings.toml`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub bind: Option<String>,
}

/// Canonical path to the settings file: `~/.config/game-shelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("game-shelf").join("settings.toml")
}

/// Default database location: `<data dir>/game-shelf/catalog.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("game-shelf").join("catalog.db")
}

impl Settings {
    /// Load the shared settings file. A missing file yields defaults.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path())
    }

    /// Load settings from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(SettingsError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Resolve the database path:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `database.path` in `settings.toml`
    /// 3. [`default_database_path`]
    pub fn database_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(default_database_path)
    }

    /// Resolve the bind address: CLI override, then `server.bind`, then [`DEFAULT_BIND`].
    pub fn bind_address(&self, cli_override: Option<String>) -> String {
        cli_override
            .or_else(|| self.server.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
    }
}

/// Save (or clear) the database path in the shared settings file.
pub fn save_database_path(path: Option<&Path>) -> io::Result<()> {
    save_database_path_to(&settings_path(), path)
}

/// Save (or clear) `database.path` in a specific settings file.
///
/// Uses `toml::Value` for a surgical update so unrelated keys are preserved.
/// An existing file that is not valid TOML is left untouched and reported.
pub fn save_database_path_to(settings: &Path, path: Option<&Path>) -> io::Result<()> {
    let mut doc: toml::Value = match std::fs::read_to_string(settings) {
        Ok(contents) => contents.parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} is not valid TOML: {}", settings.display(), e),
            )
        })?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => toml::Value::Table(Default::default()),
        Err(e) => return Err(e),
    };

    // Ensure [database] table exists
    let table = doc
        .as_table_mut()
        .ok_or_else(|| io::Error::other("settings.toml root is not a table"))?;
    let database = table
        .entry("database")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let db_table = database
        .as_table_mut()
        .ok_or_else(|| io::Error::other("[database] is not a table"))?;

    match path {
        Some(p) => {
            db_table.insert(
                "path".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            db_table.remove("path");
        }
    }

    // Write atomically
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&doc).map_err(io::Error::other)?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, settings)?;

    Ok(())
}

/// Load the full settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}
