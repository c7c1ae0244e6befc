//! Error catalog and error type for errcat
//!
//! Every [`ErrcatError`] maps onto a stable [`ErrorCode`] from the catalog so
//! the CLI can print `error[ERRCAT-Exxx]` together with remediation steps.
//!
//! # Error Code Ranges
//!
//! | Range      | Category    | Description                          |
//! |------------|-------------|--------------------------------------|
//! | E001-E099  | Config      | Configuration and environment errors |
//! | E100-E199  | Catalog     | Catalog loading and parsing errors   |
//! | E500-E599  | Internal    | Internal/unexpected errors           |

pub mod catalog;

pub use catalog::{ErrorCategory, ErrorCode, ErrorEntry};

use crate::config::EnvError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout errcat-common.
pub type Result<T> = std::result::Result<T, ErrcatError>;

/// Failures that stop errcat from running a check at all.
///
/// Violations found *inside* a catalog are not errors; they are reported
/// through [`crate::validate::CheckResult`].
#[derive(Debug, Error)]
pub enum ErrcatError {
    /// Explicitly requested configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration file exists but could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration file is not valid TOML or has the wrong shape.
    #[error("invalid configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration values failed validation.
    #[error("configuration is invalid: {}", problems.join("; "))]
    ConfigInvalid { problems: Vec<String> },

    /// One or more ERRCAT_* environment variables were invalid.
    #[error("invalid environment configuration: {}", join_env_errors(errors))]
    ConfigEnv { errors: Vec<EnvError> },

    /// No catalog path was given on the command line, env or config file.
    #[error("no catalog path configured")]
    NoCatalog,

    /// Catalog file does not exist.
    #[error("catalog not found: {}", path.display())]
    CatalogNotFound { path: PathBuf },

    /// Catalog file could not be read.
    #[error("failed to read catalog {}: {source}", path.display())]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Catalog text is not valid JSON/TOML.
    #[error("failed to parse catalog {origin}: {message}")]
    CatalogParse { origin: String, message: String },

    /// Catalog root is a scalar or array instead of an object.
    #[error("catalog root must be an object, found {found}")]
    CatalogRootNotObject { found: &'static str },

    /// Output could not be serialized.
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The tracing subscriber could not be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl ErrcatError {
    /// Stable catalog code for this failure.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Self::ConfigRead { .. } => ErrorCode::ConfigReadError,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::ConfigInvalid { .. } => ErrorCode::ConfigValidationError,
            Self::ConfigEnv { .. } => ErrorCode::ConfigEnvError,
            Self::NoCatalog => ErrorCode::ConfigNoCatalog,
            Self::CatalogNotFound { .. } => ErrorCode::CatalogNotFound,
            Self::CatalogRead { .. } => ErrorCode::CatalogReadError,
            Self::CatalogParse { .. } => ErrorCode::CatalogParseError,
            Self::CatalogRootNotObject { .. } => ErrorCode::CatalogRootNotObject,
            Self::Serialize { .. } => ErrorCode::InternalSerdeError,
            Self::Write { .. } => ErrorCode::InternalWriteError,
            Self::Logging(_) => ErrorCode::InternalLoggingError,
        }
    }
}

fn join_env_errors(errors: &[EnvError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_maps_to_catalog_code() {
        let err = ErrcatError::CatalogParse {
            origin: "catalog.json".to_string(),
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::CatalogParseError);
        assert_eq!(
            err.to_string(),
            "failed to parse catalog catalog.json: expected value at line 1 column 1"
        );

        assert_eq!(ErrcatError::NoCatalog.code().code_string(), "ERRCAT-E006");
    }

    #[test]
    fn test_env_errors_are_joined() {
        let err = ErrcatError::ConfigEnv {
            errors: vec![
                EnvError::InvalidLogLevel {
                    var: "ERRCAT_LOG_LEVEL".to_string(),
                    value: "loud".to_string(),
                },
                EnvError::InvalidValue {
                    var: "ERRCAT_MARKER_FLOOR".to_string(),
                    expected: "signed 64-bit integer",
                    value: "x".to_string(),
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("ERRCAT_LOG_LEVEL"));
        assert!(text.contains("; "));
        assert_eq!(err.code(), ErrorCode::ConfigEnvError);
    }
}
