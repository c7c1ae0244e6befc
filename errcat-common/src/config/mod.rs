//! Configuration system for errcat.
//!
//! Values are layered, lowest precedence first:
//! - built-in defaults
//! - `errcat.toml` (explicit `--config`, `ERRCAT_CONFIG`, or discovered by
//!   walking up from the working directory)
//! - `ERRCAT_*` environment variables
//! - command-line flags
//!
//! Each value keeps track of the layer that set it (see [`Sourced`]).

pub mod env;
pub mod file;
pub mod source;
pub mod validate;

pub use env::{EnvError, EnvParser, expand_home};
pub use file::{CONFIG_FILE_NAME, ConfigFile, discover};
pub use source::{ConfigSource, Sourced};
pub use validate::{ConfigWarning, Severity, validate_config};

use crate::errors::{ErrcatError, Result};
use crate::marker::MarkerSource;
use crate::ranges::{CodeRange, RangeTable};
use crate::validate::resolve_floor;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub marker: Option<PathBuf>,
    pub marker_category: Option<String>,
    pub floor: Option<i64>,
    /// Added to (or replacing entries of) the file's range table.
    pub ranges: Vec<(String, CodeRange)>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct ErrcatConfig {
    /// The config file that was loaded, if any.
    pub config_file: Option<PathBuf>,
    pub catalog: Sourced<Option<PathBuf>>,
    pub marker: Sourced<Option<PathBuf>>,
    pub marker_category: Sourced<Option<String>>,
    pub floor: Sourced<Option<i64>>,
    pub ranges: RangeTable,
}

impl Default for ErrcatConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            catalog: Sourced::default_value(None),
            marker: Sourced::default_value(None),
            marker_category: Sourced::default_value(None),
            floor: Sourced::default_value(None),
            ranges: RangeTable::new(),
        }
    }
}

impl ErrcatConfig {
    /// Resolves every layer from the real environment.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let mut env = EnvParser::new();
        let env_config = env.get_optional_path("CONFIG");

        let config_path = overrides.config.clone().or(env_config.value).or_else(|| {
            std::env::current_dir()
                .ok()
                .and_then(|cwd| discover(&cwd))
        });
        let file = match &config_path {
            Some(path) => Some((ConfigFile::load(path)?, path.clone())),
            None => None,
        };

        let config = Self::resolve(file, &mut env, overrides)?;
        debug!(
            config_file = ?config.config_file,
            catalog = ?config.catalog.value,
            marker = ?config.marker.value,
            ranges = config.ranges.len(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Layers an already-loaded file, the environment and CLI overrides.
    pub fn resolve(
        file: Option<(ConfigFile, PathBuf)>,
        env: &mut EnvParser,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some((file, path)) = file {
            config.catalog.layer(Sourced::from_file(file.catalog.path, &path).into_present());
            config.marker.layer(Sourced::from_file(file.marker.path, &path).into_present());
            config
                .marker_category
                .layer(Sourced::from_file(file.marker.category, &path).into_present());
            config.floor.layer(Sourced::from_file(file.marker.floor, &path).into_present());
            config.ranges = file.ranges;
            config.config_file = Some(path);
        }

        config.catalog.layer(env.get_optional_path("CATALOG").into_present());
        config.marker.layer(env.get_optional_path("MARKER").into_present());
        config
            .marker_category
            .layer(env.get_optional_string("MARKER_CATEGORY").into_present());
        config.floor.layer(env.get_optional_i64("MARKER_FLOOR").into_present());
        if env.has_errors() {
            return Err(ErrcatError::ConfigEnv {
                errors: env.take_errors(),
            });
        }

        config.catalog.layer(cli(&overrides.catalog));
        config.marker.layer(cli(&overrides.marker));
        config.marker_category.layer(cli(&overrides.marker_category));
        config.floor.layer(cli(&overrides.floor));
        for (name, range) in &overrides.ranges {
            config.ranges.insert(name.clone(), *range);
        }

        Ok(config)
    }

    /// Path of the catalog to check.
    pub fn catalog_path(&self) -> Result<&Path> {
        self.catalog.value.as_deref().ok_or(ErrcatError::NoCatalog)
    }

    /// Floor seeding the max-code tracker.
    pub fn floor(&self) -> i64 {
        resolve_floor(
            &self.ranges,
            self.marker_category.value.as_deref(),
            self.floor.value,
        )
    }

    /// The marker artifact: the configured marker file, or else the catalog
    /// file's own text.
    pub fn marker_source(&self) -> Result<MarkerSource> {
        match &self.marker.value {
            Some(path) => Ok(MarkerSource::for_path(path)),
            None => Ok(MarkerSource::TextFile(self.catalog_path()?.to_path_buf())),
        }
    }

    /// Fails on error-level findings and returns the warnings.
    pub fn ensure_valid(&self) -> Result<Vec<ConfigWarning>> {
        let (errors, warnings): (Vec<_>, Vec<_>) = validate_config(self)
            .into_iter()
            .partition(|finding| finding.severity == Severity::Error);
        if !errors.is_empty() {
            return Err(ErrcatError::ConfigInvalid {
                problems: errors.iter().map(ToString::to_string).collect(),
            });
        }
        for warning in &warnings {
            warn!(field = %warning.field, "{}", warning.message);
        }
        Ok(warnings)
    }
}

fn cli<T: Clone>(value: &Option<T>) -> Option<Sourced<Option<T>>> {
    value.clone().map(|v| Sourced::from_cli(Some(v)))
}

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
