//! Tracing subscriber setup shared by the errcat binary and tests.
//!
//! The CLI sends console output to stderr ([`LogConfig::with_stderr`]) so
//! stdout stays clean for reports. An optional log file receives JSON lines
//! through a non-blocking writer; keep the returned [`LoggingGuards`] alive until exit or buffered
//! lines are lost.

use crate::config::EnvParser;
use crate::errors::{ErrcatError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Console log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// An `EnvFilter` directive such as `info` or `errcat_common=trace`.
    pub level: String,
    pub format: LogFormat,
    pub file: Option<PathBuf>,
    /// Console output to stderr instead of stdout.
    pub stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            file: None,
            stderr: false,
        }
    }
}

impl LogConfig {
    /// Reads `ERRCAT_LOG_LEVEL`, `ERRCAT_LOG_FORMAT` and `ERRCAT_LOG_FILE`.
    ///
    /// Invalid values fall back to defaults.
    pub fn from_env(default_level: &str) -> Self {
        let mut env = EnvParser::new();
        let level = env.get_log_level("LOG_LEVEL", default_level).value;
        let format = env
            .get_optional_string("LOG_FORMAT")
            .value
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();
        let file = env.get_optional_path("LOG_FILE").value;
        Self {
            level,
            format,
            file,
            stderr: false,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[must_use]
    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }
}

/// Keeps background log writers alive.
#[must_use = "dropping the guards flushes and stops file logging"]
pub struct LoggingGuards {
    _file: Option<WorkerGuard>,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuards> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| ErrcatError::Logging(format!("invalid filter '{}': {e}", config.level)))?;

    let writer = if config.stderr {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };
    let mut layers: Vec<BoxedLayer> = vec![match config.format {
        LogFormat::Pretty => fmt::layer().with_writer(writer).with_target(false).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    }];

    let mut file_guard = None;
    if let Some(path) = &config.file {
        let (dir, name) = split_log_path(path)?;
        std::fs::create_dir_all(&dir).map_err(|e| {
            ErrcatError::Logging(format!("cannot create log directory {}: {e}", dir.display()))
        })?;
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| ErrcatError::Logging(e.to_string()))?;

    Ok(LoggingGuards { _file: file_guard })
}

fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = path
        .file_name()
        .ok_or_else(|| ErrcatError::Logging(format!("log file {} has no name", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}
