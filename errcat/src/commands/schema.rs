//! `errcat schema`: JSON schemas of errcat's machine-readable output.

use super::Outcome;
use super::helpers::print_json;
use crate::cli::SchemaKind;
use anyhow::Result;
use errcat_common::schema::{
    export_schemas, generate_catalog_rows_schema, generate_error_catalog, generate_report_schema,
};
use std::path::Path;

pub fn run(kind: SchemaKind, output_dir: Option<&Path>) -> Result<Outcome> {
    if let Some(dir) = output_dir {
        let result = export_schemas(dir)?;
        for file in &result.files {
            println!("{file}");
        }
        eprintln!(
            "wrote {} schema file(s) to {}",
            result.files_generated, result.output_dir
        );
        return Ok(Outcome::Success);
    }

    match kind {
        SchemaKind::Report => print_json("report schema", &generate_report_schema())?,
        SchemaKind::Rows => print_json("catalog row schema", &generate_catalog_rows_schema())?,
        SchemaKind::ErrorCodes => print_json("error catalog", &generate_error_catalog())?,
    }
    Ok(Outcome::Success)
}
