//! The `errcat.toml` configuration file.
//!
//! ```toml
//! [catalog]
//! path = "src/errors.json"
//!
//! [marker]
//! path = "docs/ERRORS.md"
//! category = "compiler"
//!
//! [ranges]
//! compiler = { min = 1001, max = 1999 }
//! runtime = { min = 2000, max = 2999 }
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use super::env::expand_home;
use crate::errors::{ErrcatError, Result};
use crate::ranges::RangeTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up by [`discover`].
pub const CONFIG_FILE_NAME: &str = "errcat.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerSection {
    /// Marker artifact; `.toml` is read as versioned metadata.
    pub path: Option<PathBuf>,
    /// Category whose range seeds the max-code floor.
    pub category: Option<String>,
    /// Explicit floor, overriding `category`.
    pub floor: Option<i64>,
}

/// Parsed contents of an `errcat.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub catalog: CatalogSection,
    pub marker: MarkerSection,
    pub ranges: RangeTable,
}

impl ConfigFile {
    /// Parses TOML text; `origin` is used for error messages and path
    /// resolution.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let mut file: ConfigFile =
            toml::from_str(text).map_err(|source| ErrcatError::ConfigParse {
                path: origin.to_path_buf(),
                source,
            })?;
        let base = origin.parent().unwrap_or_else(|| Path::new(""));
        file.catalog.path = file.catalog.path.map(|p| resolve_path(base, &p));
        file.marker.path = file.marker.path.map(|p| resolve_path(base, &p));
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ErrcatError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ErrcatError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&text, path)?;
        debug!(path = %path.display(), ranges = file.ranges.len(), "loaded config file");
        Ok(file)
    }
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let expanded = expand_home(&path.to_string_lossy());
    if expanded.is_absolute() || base.as_os_str().is_empty() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Finds `errcat.toml` in `start` or the nearest ancestor.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
