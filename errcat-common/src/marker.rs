//! The maintained "next error code" marker.
//!
//! Two artifact formats are understood:
//!
//! - **Text**: any document (README, comment header, changelog) containing a
//!   line like `Next error code: 1003`.
//! - **Metadata**: a small versioned TOML file next to the catalog:
//!
//! ```toml
//! schema_version = 1
//! next_code = 1003
//! ```
//!
//! A file ending in `.toml` is read as metadata, anything else as text.

use crate::validate::MarkerMismatch;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Version of the metadata file format understood by this build.
pub const MARKER_SCHEMA_VERSION: u32 = 1;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Next error code:\s*(-?\d+)").expect("marker pattern is valid")
});

/// Where the marker value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerSource {
    /// Free text to scan for `Next error code: N`.
    Text(String),
    /// Contents of a versioned metadata TOML file.
    Metadata(String),
    /// A file read once at check time; format chosen by extension.
    File(PathBuf),
    /// A file scanned as text whatever its extension, e.g. the catalog
    /// source itself when the marker lives in its header comment.
    TextFile(PathBuf),
}

impl MarkerSource {
    /// Picks the source kind for a marker file path.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Human-readable name of the source for messages.
    pub fn origin(&self) -> String {
        match self {
            Self::Text(_) => "marker text".to_string(),
            Self::Metadata(_) => "marker metadata".to_string(),
            Self::File(path) | Self::TextFile(path) => path.display().to_string(),
        }
    }

    /// Reads (for files) and parses the marker.
    pub fn resolve(&self) -> Result<Marker, MarkerMismatch> {
        match self {
            Self::Text(text) => parse_marker_text(text, &self.origin()),
            Self::Metadata(text) => parse_marker_metadata(text, &self.origin()),
            Self::File(path) => read_marker(path),
            Self::TextFile(path) => {
                let text = read_artifact(path)?;
                parse_marker_text(&text, &self.origin())
            }
        }
    }
}

/// A parsed marker value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub next_code: i64,
    /// 1-based line of the marker in a text artifact.
    pub line: Option<usize>,
}

/// Scans text for `Next error code: N`.
///
/// Repeated markers are accepted when they agree; disagreeing markers are a
/// [`MarkerMismatch::Conflicting`].
pub fn parse_marker_text(text: &str, origin: &str) -> Result<Marker, MarkerMismatch> {
    let mut found: Vec<(i64, usize)> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        for captures in MARKER_RE.captures_iter(line) {
            let digits = &captures[1];
            let value = digits.parse::<i64>().map_err(|e| MarkerMismatch::Unparsable {
                origin: origin.to_string(),
                reason: format!("'{digits}' on line {}: {e}", idx + 1),
            })?;
            found.push((value, idx + 1));
        }
    }

    let Some(&(next_code, line)) = found.first() else {
        return Err(MarkerMismatch::Missing {
            origin: origin.to_string(),
        });
    };

    if found.iter().any(|(value, _)| *value != next_code) {
        let values: BTreeSet<i64> = found.iter().map(|(value, _)| *value).collect();
        return Err(MarkerMismatch::Conflicting {
            origin: origin.to_string(),
            values: values.into_iter().collect(),
        });
    }

    debug!(origin, next_code, line, "parsed text marker");
    Ok(Marker {
        next_code,
        line: Some(line),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MarkerMetadata {
    schema_version: u32,
    next_code: i64,
}

/// Parses a versioned metadata TOML document.
pub fn parse_marker_metadata(text: &str, origin: &str) -> Result<Marker, MarkerMismatch> {
    let metadata: MarkerMetadata =
        toml::from_str(text).map_err(|e| MarkerMismatch::Unparsable {
            origin: origin.to_string(),
            reason: e.to_string().trim().to_string(),
        })?;

    if metadata.schema_version != MARKER_SCHEMA_VERSION {
        return Err(MarkerMismatch::Unparsable {
            origin: origin.to_string(),
            reason: format!(
                "unsupported schema_version {} (expected {MARKER_SCHEMA_VERSION})",
                metadata.schema_version
            ),
        });
    }

    debug!(origin, next_code = metadata.next_code, "parsed metadata marker");
    Ok(Marker {
        next_code: metadata.next_code,
        line: None,
    })
}

/// Reads a marker file once. Read failures are reported as
/// [`MarkerMismatch::Unreadable`] so only the marker check fails.
pub fn read_marker(path: &Path) -> Result<Marker, MarkerMismatch> {
    let text = read_artifact(path)?;
    let origin = path.display().to_string();
    if is_metadata_path(path) {
        parse_marker_metadata(&text, &origin)
    } else {
        parse_marker_text(&text, &origin)
    }
}

fn read_artifact(path: &Path) -> Result<String, MarkerMismatch> {
    std::fs::read_to_string(path).map_err(|e| MarkerMismatch::Unreadable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn is_metadata_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

/// The line maintainers paste into the text artifact.
pub fn marker_line(next_code: i64) -> String {
    format!("Next error code: {next_code}")
}
