//! `errcat config`: show resolved settings and their sources.

use super::Outcome;
use super::helpers::print_json;
use crate::cli::{CatalogArgs, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use errcat_common::RangeTable;
use errcat_common::config::{ConfigWarning, ErrcatConfig, Severity, Sourced, validate_config};
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct ConfigView<'a> {
    config_file: Option<&'a Path>,
    catalog: &'a Sourced<Option<PathBuf>>,
    marker: &'a Sourced<Option<PathBuf>>,
    marker_category: &'a Sourced<Option<String>>,
    floor: &'a Sourced<Option<i64>>,
    effective_floor: i64,
    ranges: &'a RangeTable,
    findings: Vec<ConfigWarning>,
}

pub fn run(args: &CatalogArgs, format: OutputFormat) -> Result<Outcome> {
    let config = ErrcatConfig::load(&args.overrides())?;
    let view = ConfigView {
        config_file: config.config_file.as_deref(),
        catalog: &config.catalog,
        marker: &config.marker,
        marker_category: &config.marker_category,
        floor: &config.floor,
        effective_floor: config.floor(),
        ranges: &config.ranges,
        findings: validate_config(&config),
    };

    match format {
        OutputFormat::Json => print_json("configuration", &view)?,
        OutputFormat::Text => print!("{}", render_text(&view)),
    }
    Ok(Outcome::Success)
}

fn line<T: Display>(name: &str, value: Option<T>, source: &dyn Display) -> String {
    match value {
        Some(value) => format!("{name:<16} {value}  {}\n", format!("({source})").dimmed()),
        None => format!("{name:<16} {}\n", "(not set)".dimmed()),
    }
}

fn render_text(view: &ConfigView<'_>) -> String {
    let mut out = String::new();
    out.push_str(&match view.config_file {
        Some(path) => format!("{:<16} {}\n", "config file", path.display()),
        None => format!("{:<16} {}\n", "config file", "(none found)".dimmed()),
    });
    out.push_str(&line(
        "catalog",
        view.catalog.value.as_ref().map(|p| p.display()),
        &view.catalog.source,
    ));
    out.push_str(&line(
        "marker",
        view.marker.value.as_ref().map(|p| p.display()),
        &view.marker.source,
    ));
    out.push_str(&line(
        "marker category",
        view.marker_category.value.as_deref(),
        &view.marker_category.source,
    ));
    out.push_str(&line("floor", view.floor.value, &view.floor.source));
    out.push_str(&format!("{:<16} {}\n", "effective floor", view.effective_floor));

    out.push_str("\nranges:\n");
    if view.ranges.is_empty() {
        out.push_str(&format!("  {}\n", "(none)".dimmed()));
    }
    for (name, range) in view.ranges.iter() {
        out.push_str(&format!("  {name:<14} {range}\n"));
    }

    if !view.findings.is_empty() {
        out.push('\n');
        for finding in &view.findings {
            let label = match finding.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
            };
            out.push_str(&format!("{label}: {finding}\n"));
        }
    }
    out
}
