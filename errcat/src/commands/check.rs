//! `errcat check`: run the registry checks.

use super::Outcome;
use super::helpers::{indent_lines, load, print_json};
use crate::cli::{CatalogArgs, OutputFormat};
use anyhow::Result;
use colored::Colorize;
use errcat_common::{CheckResult, ValidationReport, validate_catalog};

pub fn run(args: &CatalogArgs, format: OutputFormat) -> Result<Outcome> {
    let loaded = load(args)?;
    let marker = loaded.config.marker_source()?;
    let floor = loaded.config.floor();
    tracing::debug!(floor, marker = %marker.origin(), "running checks");

    let report = validate_catalog(&loaded.catalog, &loaded.config.ranges, &marker, floor);

    match format {
        OutputFormat::Json => print_json("validation report", &report)?,
        OutputFormat::Text => println!("{}", render_text(&report)),
    }

    Ok(if report.passed() {
        Outcome::Success
    } else {
        Outcome::ChecksFailed
    })
}

fn render_check(check: &CheckResult) -> String {
    let status = if check.pass {
        check.status_label().green().bold()
    } else {
        check.status_label().red().bold()
    };
    let mut out = format!("{status} {}: {}", check.kind.name().bold(), check.message);
    for violation in &check.violations {
        out.push('\n');
        out.push_str(&indent_lines(&violation.to_string(), "    - "));
    }
    out
}

pub fn render_text(report: &ValidationReport) -> String {
    let mut out = String::new();
    for check in &report.checks {
        out.push_str(&render_check(check));
        out.push('\n');
    }

    let passed = report.checks.iter().filter(|check| check.pass).count();
    let summary = format!(
        "{passed} of {} checks passed ({} descriptors, next code {})",
        report.checks.len(),
        report.descriptors,
        report.expected_marker
    );
    out.push('\n');
    if report.passed() {
        out.push_str(&summary.green().to_string());
    } else {
        out.push_str(&summary.red().to_string());
    }
    out
}
