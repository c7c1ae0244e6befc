//! Startup validation of the resolved configuration.

use super::ErrcatConfig;
use serde::Serialize;
use std::fmt;

/// How serious a configuration finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suspicious but usable.
    Warning,
    /// Checks cannot run meaningfully.
    Error,
}

/// A single configuration finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub severity: Severity,
    /// The setting the finding is about, e.g. `ranges.compiler`.
    pub field: String,
    pub message: String,
}

impl ConfigWarning {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Checks the range table and marker settings for consistency.
pub fn validate_config(config: &ErrcatConfig) -> Vec<ConfigWarning> {
    let mut findings = Vec::new();

    if config.ranges.is_empty() {
        findings.push(ConfigWarning::warning(
            "ranges",
            "no category ranges configured; every descriptor will be an unknown category",
        ));
    }

    for (name, range) in config.ranges.iter() {
        if !range.is_well_formed() {
            findings.push(ConfigWarning::error(
                format!("ranges.{name}"),
                format!("min {} is greater than max {}", range.min, range.max),
            ));
        }
    }

    for (a, b) in config.ranges.overlapping_pairs() {
        findings.push(ConfigWarning::error(
            format!("ranges.{a}"),
            format!("range overlaps ranges.{b}; category ranges must be disjoint"),
        ));
    }

    if let Some(category) = config.marker_category.value.as_deref()
        && config.ranges.get(category).is_none()
    {
        findings.push(ConfigWarning::warning(
            "marker.category",
            format!("category '{category}' has no range; the floor falls back to the lowest range"),
        ));
    }

    findings
}
