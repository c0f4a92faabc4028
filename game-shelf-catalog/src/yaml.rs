//! YAML loading for human-curated seed data.
//!
//! Loads genre and platform lists from the `catalog/` directory.

use crate::types::{Genre, Platform};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// Result type for [`load_catalog`] containing all loaded seed data.
pub type CatalogData = (Vec<Genre>, Vec<Platform>);

/// Load all genres from YAML files in a directory.
///
/// Each `.yaml` file should contain a YAML sequence of `{ id, name }` entries.
pub fn load_genres(dir: &Path) -> Result<Vec<Genre>, YamlError> {
    load_yaml_lists(dir)
}

/// Load all platforms from YAML files in a directory.
///
/// Each `.yaml` file should contain a YAML sequence of `{ id, name }` entries.
pub fn load_platforms(dir: &Path) -> Result<Vec<Platform>, YamlError> {
    load_yaml_lists(dir)
}

/// Load all seed data from the standard directory layout.
///
/// Expected structure:
/// ```text
/// catalog_dir/
///   genres/
///     genres.yaml
///   platforms/
///     nintendo.yaml
///     sony.yaml
///     ...
/// ```
pub fn load_catalog(catalog_dir: &Path) -> Result<CatalogData, YamlError> {
    let genres = load_genres(&catalog_dir.join("genres"))?;
    let platforms = load_platforms(&catalog_dir.join("platforms"))?;
    Ok((genres, platforms))
}

/// Generic helper: load all YAML files in a directory, each containing a list of `T`.
fn load_yaml_lists<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut items = Vec::new();
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let contents = std::fs::read_to_string(&path).map_err(|e| YamlError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let list: Vec<T> = serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        items.extend(list);
    }

    Ok(items)
}
