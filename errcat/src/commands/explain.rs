//! `errcat explain`: look up errcat's own error codes.

use super::Outcome;
use super::helpers::print_json;
use crate::cli::OutputFormat;
use anyhow::{Result, bail};
use colored::Colorize;
use errcat_common::{ErrorCategory, ErrorCode, ErrorEntry};

pub fn run(code: Option<&str>, format: OutputFormat) -> Result<Outcome> {
    let Some(code) = code else {
        let entries: Vec<ErrorEntry> = ErrorCode::all().iter().map(ErrorCode::entry).collect();
        match format {
            OutputFormat::Json => print_json("error catalog", &entries)?,
            OutputFormat::Text => print!("{}", render_index()),
        }
        return Ok(Outcome::Success);
    };

    let Some(error_code) = ErrorCode::from_code_string(code) else {
        bail!("unknown error code '{code}' (run `errcat explain` for the full list)");
    };
    let entry = error_code.entry();
    match format {
        OutputFormat::Json => print_json("error entry", &entry)?,
        OutputFormat::Text => print!("{}", entry.format_full()),
    }
    Ok(Outcome::Success)
}

fn render_index() -> String {
    let mut out = String::new();
    for category in ErrorCategory::all() {
        let (min, max) = category.code_range();
        out.push_str(&format!(
            "{} (E{min:03}-E{max:03}): {}\n",
            category.name().bold(),
            category.description()
        ));
        for code in ErrorCode::all().iter().filter(|c| c.category() == *category) {
            out.push_str(&format!("  {}  {}\n", code.code_string(), code.message()));
        }
    }
    out
}
