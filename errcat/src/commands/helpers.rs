//! Shared helper functions for errcat commands.

use crate::cli::CatalogArgs;
use anyhow::Result;
use colored::Colorize;
use errcat_common::config::{ConfigWarning, ErrcatConfig};
use errcat_common::{Catalog, schema};
use serde::Serialize;

/// Resolved configuration plus the loaded catalog.
pub struct Loaded {
    pub config: ErrcatConfig,
    pub catalog: Catalog,
}

/// Resolves configuration, rejects invalid ranges and loads the catalog.
pub fn load(args: &CatalogArgs) -> Result<Loaded> {
    let config = ErrcatConfig::load(&args.overrides())?;
    let warnings = config.ensure_valid()?;
    print_warnings(&warnings);

    let path = config.catalog_path()?;
    let catalog = Catalog::load(path)?;
    tracing::info!(
        path = %path.display(),
        descriptors = catalog.descriptor_count(),
        "catalog loaded"
    );
    Ok(Loaded { config, catalog })
}

pub fn print_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("{}: {warning}", "warning".yellow().bold());
    }
}

pub fn print_json<T: Serialize>(what: &'static str, value: &T) -> Result<()> {
    print!("{}", schema::to_pretty(what, value)?);
    Ok(())
}

/// Indent each line of text with a given prefix.
pub fn indent_lines(text: &str, prefix: &str) -> String {
    let mut out = String::new();
    for (idx, line) in text.lines().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        out.push_str(line);
    }
    out
}

/// Pads `text` on the right to `width` characters.
pub fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}
