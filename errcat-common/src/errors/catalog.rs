//! Stable codes for errcat's own failures.
//!
//! These are distinct from the violations errcat reports about a user's
//! catalog: a violation fails a check, an [`ErrorCode`] stops the run with
//! exit status 2. `errcat explain ERRCAT-Exxx` prints the message and the
//! remediation steps.
//!
//! | Codes      | Category | Covers                                   |
//! |------------|----------|------------------------------------------|
//! | E001-E099  | Config   | `errcat.toml`, `ERRCAT_*` variables      |
//! | E100-E199  | Catalog  | reading and parsing the catalog file     |
//! | E500-E599  | Internal | output, logging and anything unexpected  |

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    ConfigNotFound,
    ConfigReadError,
    ConfigParseError,
    /// Range table or marker settings rejected by `validate_config`.
    ConfigValidationError,
    ConfigEnvError,
    ConfigNoCatalog,

    CatalogNotFound,
    CatalogReadError,
    CatalogParseError,
    CatalogRootNotObject,

    InternalSerdeError,
    InternalLoggingError,
    /// Writing exported schemas failed.
    InternalWriteError,
}

impl ErrorCode {
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            Self::ConfigNotFound => 1,
            Self::ConfigReadError => 2,
            Self::ConfigParseError => 3,
            Self::ConfigValidationError => 4,
            Self::ConfigEnvError => 5,
            Self::ConfigNoCatalog => 6,

            Self::CatalogNotFound => 100,
            Self::CatalogReadError => 101,
            Self::CatalogParseError => 102,
            Self::CatalogRootNotObject => 103,

            Self::InternalSerdeError => 500,
            Self::InternalLoggingError => 501,
            Self::InternalWriteError => 502,
        }
    }

    /// `ERRCAT-E001`.
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("ERRCAT-E{:03}", self.code_number())
    }

    /// Parses a code string such as `ERRCAT-E102`, `E102` or `102`.
    #[must_use]
    pub fn from_code_string(code: &str) -> Option<Self> {
        let trimmed = code.trim();
        let bare = trimmed.strip_prefix("ERRCAT-").unwrap_or(trimmed);
        let digits = bare
            .strip_prefix('E')
            .or_else(|| bare.strip_prefix('e'))
            .unwrap_or(bare);
        let number: u16 = digits.parse().ok()?;
        Self::all()
            .iter()
            .copied()
            .find(|candidate| candidate.code_number() == number)
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code_number() {
            1..=99 => ErrorCategory::Config,
            100..=199 => ErrorCategory::Catalog,
            _ => ErrorCategory::Internal,
        }
    }

    /// Serializable form, as printed by `errcat explain --format json`.
    #[must_use]
    pub fn entry(&self) -> ErrorEntry {
        ErrorEntry {
            code: self.code_string(),
            category: self.category(),
            message: self.message().to_string(),
            remediation: self
                .remediation()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ConfigNotFound => "Configuration file not found",
            Self::ConfigReadError => "Configuration file could not be read",
            Self::ConfigParseError => "Configuration file is not valid TOML",
            Self::ConfigValidationError => "Configuration contains invalid values",
            Self::ConfigEnvError => "Environment variable has an invalid value",
            Self::ConfigNoCatalog => "No catalog path configured",
            Self::CatalogNotFound => "Catalog file not found",
            Self::CatalogReadError => "Catalog file could not be read",
            Self::CatalogParseError => "Catalog is not valid JSON or TOML",
            Self::CatalogRootNotObject => "Catalog root must be an object of categories",
            Self::InternalSerdeError => "Failed to serialize output",
            Self::InternalLoggingError => "Failed to initialize logging",
            Self::InternalWriteError => "Failed to write an output file",
        }
    }

    /// Ordered steps, most likely fix first.
    #[must_use]
    pub const fn remediation(&self) -> &'static [&'static str] {
        match self {
            Self::ConfigNotFound => &[
                "Check the path passed with --config or ERRCAT_CONFIG",
                "Create an errcat.toml next to the catalog",
            ],
            Self::ConfigReadError => &[
                "Check file permissions on the configuration file",
                "Make sure the path points to a file, not a directory",
            ],
            Self::ConfigParseError => &[
                "Fix the TOML syntax error reported above",
                "Ranges are written as: name = { min = 1001, max = 1999 }",
            ],
            Self::ConfigValidationError => &[
                "Make sure every range has min <= max",
                "Make sure category ranges do not overlap",
            ],
            Self::ConfigEnvError => &[
                "Check ERRCAT_* environment variables for typos",
                "Unset the variable to fall back to the configuration file",
            ],
            Self::ConfigNoCatalog => &[
                "Pass --catalog <path>",
                "Or set [catalog] path in errcat.toml",
            ],
            Self::CatalogNotFound => &[
                "Check the catalog path",
                "Paths in errcat.toml are relative to the directory holding it",
            ],
            Self::CatalogReadError => &["Check file permissions on the catalog file"],
            Self::CatalogParseError => &[
                "Fix the syntax error reported above",
                "Use a .toml extension for TOML catalogs; anything else is read as JSON",
            ],
            Self::CatalogRootNotObject => &[
                "Wrap the catalog in an object keyed by category name",
            ],
            Self::InternalSerdeError => &["Please report this as a bug"],
            Self::InternalLoggingError => &[
                "Check that the log file directory is writable",
                "Unset ERRCAT_LOG_FILE to log to stderr only",
            ],
            Self::InternalWriteError => &[
                "Check that the output directory exists and is writable",
            ],
        }
    }

    /// Every code, in numeric order.
    #[must_use]
    pub const fn all() -> &'static [ErrorCode] {
        &[
            Self::ConfigNotFound,
            Self::ConfigReadError,
            Self::ConfigParseError,
            Self::ConfigValidationError,
            Self::ConfigEnvError,
            Self::ConfigNoCatalog,
            Self::CatalogNotFound,
            Self::CatalogReadError,
            Self::CatalogParseError,
            Self::CatalogRootNotObject,
            Self::InternalSerdeError,
            Self::InternalLoggingError,
            Self::InternalWriteError,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Catalog,
    Internal,
}

impl ErrorCategory {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Config => "Configuration",
            Self::Catalog => "Catalog",
            Self::Internal => "Internal",
        }
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Config => "Configuration file and environment issues",
            Self::Catalog => "Catalog file loading and structure issues",
            Self::Internal => "Internal errors that may indicate bugs",
        }
    }

    /// Inclusive numeric range owned by the category.
    #[must_use]
    pub const fn code_range(&self) -> (u16, u16) {
        match self {
            Self::Config => (1, 99),
            Self::Catalog => (100, 199),
            Self::Internal => (500, 599),
        }
    }

    #[must_use]
    pub const fn all() -> &'static [ErrorCategory] {
        &[Self::Config, Self::Catalog, Self::Internal]
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One code with its message and remediation, owned for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// `ERRCAT-Exxx`.
    pub code: String,
    pub category: ErrorCategory,
    pub message: String,
    pub remediation: Vec<String>,
}

impl ErrorEntry {
    /// `[code] message`, then numbered remediation steps.
    #[must_use]
    pub fn format_full(&self) -> String {
        let mut out = format!("{self}\n");
        if !self.remediation.is_empty() {
            out.push_str("\nRemediation steps:\n");
            for (idx, step) in self.remediation.iter().enumerate() {
                out.push_str(&format!("  {}. {step}\n", idx + 1));
            }
        }
        out
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
