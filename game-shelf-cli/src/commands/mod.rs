pub(crate) mod config;
pub(crate) mod seed;
pub(crate) mod serve;
pub(crate) mod stats;

use std::path::PathBuf;

/// Default path for seed YAML data.
pub(crate) fn default_catalog_dir() -> PathBuf {
    // Look for catalog/ relative to the current directory
    PathBuf::from("catalog")
}
