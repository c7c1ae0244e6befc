//! `errcat list`: flatten the catalog.

use super::Outcome;
use super::helpers::{load, pad, print_json};
use crate::cli::{CatalogArgs, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use errcat_common::CatalogRow;

pub fn run(args: &CatalogArgs, format: OutputFormat) -> Result<Outcome> {
    let loaded = load(args)?;
    let rows = loaded.catalog.rows();

    match format {
        OutputFormat::Json => print_json("catalog rows", &rows)?,
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("{}", "catalog has no descriptors".dimmed());
            } else {
                println!("{}", render_table(&rows));
            }
        }
    }
    Ok(Outcome::Success)
}

pub fn render_table(rows: &[CatalogRow]) -> String {
    let codes: Vec<String> = rows.iter().map(|row| row.code.to_string()).collect();
    let levels: Vec<&str> = rows
        .iter()
        .map(|row| row.level.as_ref().map_or("-", |level| level.as_str()))
        .collect();

    let code_width = codes.iter().map(String::len).max().unwrap_or(0).max("CODE".len());
    let path_width = rows.iter().map(|row| row.path.len()).max().unwrap_or(0).max("PATH".len());
    let level_width = levels.iter().map(|l| l.len()).max().unwrap_or(0).max("LEVEL".len());

    let mut lines = vec![format!(
        "{}  {}  {}  MESSAGE",
        pad("CODE", code_width),
        pad("PATH", path_width),
        pad("LEVEL", level_width)
    )];
    for ((row, code), level) in rows.iter().zip(&codes).zip(&levels) {
        lines.push(
            format!(
                "{}  {}  {}  {}",
                pad(code, code_width),
                pad(&row.path, path_width),
                pad(level, level_width),
                row.message
            )
            .trim_end()
            .to_string(),
        );
    }
    lines.join("\n")
}
