//! JSON Schema generation for errcat's machine-readable output.
//!
//! # Generated Schemas
//!
//! - `validation-report.schema.json` - output of `errcat check --format json`
//! - `catalog-rows.schema.json` - output of `errcat list --format json`
//! - `error-codes.json` - errcat's own error code catalog

use crate::catalog::CatalogRow;
use crate::errors::catalog::{ErrorCategory, ErrorCode};
use crate::errors::{ErrcatError, Result};
use crate::validate::ValidationReport;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version of the JSON output formats.
pub const OUTPUT_SCHEMA_VERSION: &str = "1.0";

#[must_use]
pub fn generate_report_schema() -> RootSchema {
    schema_for!(ValidationReport)
}

#[must_use]
pub fn generate_catalog_rows_schema() -> RootSchema {
    schema_for!(Vec<CatalogRow>)
}

/// Machine-readable error code entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorCodeEntry {
    /// Error code in ERRCAT-Exxx format.
    pub code: String,
    pub number: u16,
    pub category: ErrorCategory,
    pub message: String,
    pub remediation: Vec<String>,
}

/// Machine-readable error category entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorCategoryEntry {
    pub id: ErrorCategory,
    pub name: String,
    pub description: String,
    /// Code range (e.g., "001-099").
    pub code_range: String,
}

/// errcat's error catalog for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorCatalog {
    pub schema_version: String,
    pub tool_version: String,
    pub categories: Vec<ErrorCategoryEntry>,
    pub errors: Vec<ErrorCodeEntry>,
}

#[must_use]
pub fn generate_error_catalog() -> ErrorCatalog {
    let categories = ErrorCategory::all()
        .iter()
        .map(|category| {
            let (min, max) = category.code_range();
            ErrorCategoryEntry {
                id: *category,
                name: category.name().to_string(),
                description: category.description().to_string(),
                code_range: format!("{min:03}-{max:03}"),
            }
        })
        .collect();

    let errors = ErrorCode::all()
        .iter()
        .map(|code| {
            let entry = code.entry();
            ErrorCodeEntry {
                code: entry.code,
                number: code.code_number(),
                category: entry.category,
                message: entry.message,
                remediation: entry.remediation,
            }
        })
        .collect();

    ErrorCatalog {
        schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        categories,
        errors,
    }
}

/// Schema export result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaExportResult {
    pub files_generated: usize,
    pub files: Vec<String>,
    pub output_dir: String,
}

/// Writes every schema into `output_dir`, creating it if needed.
pub fn export_schemas(output_dir: &Path) -> Result<SchemaExportResult> {
    std::fs::create_dir_all(output_dir).map_err(|source| ErrcatError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let outputs = [
        (
            "validation-report.schema.json",
            to_pretty("report schema", &generate_report_schema())?,
        ),
        (
            "catalog-rows.schema.json",
            to_pretty("catalog row schema", &generate_catalog_rows_schema())?,
        ),
        (
            "error-codes.json",
            to_pretty("error catalog", &generate_error_catalog())?,
        ),
    ];

    let mut files = Vec::new();
    for (name, contents) in outputs {
        let path = output_dir.join(name);
        std::fs::write(&path, contents).map_err(|source| ErrcatError::Write {
            path: path.clone(),
            source,
        })?;
        files.push(path.display().to_string());
    }

    Ok(SchemaExportResult {
        files_generated: files.len(),
        files,
        output_dir: output_dir.display().to_string(),
    })
}

/// Pretty JSON with a trailing newline.
pub fn to_pretty<T: Serialize>(what: &'static str, value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|source| ErrcatError::Serialize { what, source })?;
    json.push('\n');
    Ok(json)
}
