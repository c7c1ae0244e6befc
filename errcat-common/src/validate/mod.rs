//! Registry checks over an error catalog.
//!
//! Three independent checks run over one traversal:
//!
//! - [`CheckKind::CodeRange`]: every code is an integer within its top-level
//!   category's range.
//! - [`CheckKind::UniqueCodes`]: no code appears twice anywhere.
//! - [`CheckKind::NextCodeMarker`]: the maintained marker equals the highest
//!   code plus one.
//!
//! A failing check never stops the others. Each one collects every violation
//! it sees and reports them in traversal order.

pub mod next_code;
pub mod range;
pub mod unique;
pub mod violation;

pub use next_code::{MaxCodeTracker, check_next_code, next_free_code, resolve_floor};
pub use range::{RangeValidator, check_ranges};
pub use unique::{UniquenessValidator, check_uniqueness};
pub use violation::{DuplicateCodeViolation, MarkerMismatch, RangeViolation, Violation};

use crate::catalog::{Catalog, CatalogVisitor, DescriptorPath, ErrorDescriptor, walk_all};
use crate::marker::MarkerSource;
use crate::ranges::RangeTable;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// The checks errcat knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CheckKind {
    CodeRange,
    UniqueCodes,
    NextCodeMarker,
}

impl CheckKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CodeRange => "code-range",
            Self::UniqueCodes => "unique-codes",
            Self::NextCodeMarker => "next-code-marker",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::CodeRange => "Every code is an integer inside its category's range",
            Self::UniqueCodes => "No code is used by more than one descriptor",
            Self::NextCodeMarker => "The next error code marker equals the highest code + 1",
        }
    }

    pub const fn all() -> &'static [CheckKind] {
        &[Self::CodeRange, Self::UniqueCodes, Self::NextCodeMarker]
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub pass: bool,
    /// One-line summary.
    pub message: String,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

impl CheckResult {
    /// A check passes exactly when it found no violations.
    pub fn new(kind: CheckKind, message: impl Into<String>, violations: Vec<Violation>) -> Self {
        let result = Self {
            kind,
            pass: violations.is_empty(),
            message: message.into(),
            violations,
        };
        info!(
            check = %result.kind,
            pass = result.pass,
            violations = result.violations.len(),
            "{}",
            result.message
        );
        result
    }

    pub const fn status_label(&self) -> &'static str {
        if self.pass { "PASS" } else { "FAIL" }
    }

    /// Status line followed by one indented line per violation.
    pub fn format_full(&self) -> String {
        let mut out = format!("{} {}: {}", self.status_label(), self.kind, self.message);
        for violation in &self.violations {
            out.push_str("\n    - ");
            out.push_str(&violation.to_string());
        }
        out
    }
}

/// Result of a combined validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    /// Number of descriptors visited.
    pub descriptors: usize,
    /// Highest integer code seen, or the floor when there were none.
    pub max_code: i64,
    /// The value the marker should hold.
    pub expected_marker: i64,
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.pass)
    }

    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.kind == kind)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|check| !check.pass)
    }

    pub fn violation_count(&self) -> usize {
        self.checks.iter().map(|check| check.violations.len()).sum()
    }

    pub fn format_text(&self) -> String {
        let mut out = String::new();
        for check in &self.checks {
            out.push_str(&check.format_full());
            out.push('\n');
        }
        let passed = self.checks.iter().filter(|check| check.pass).count();
        out.push_str(&format!(
            "\n{passed} of {} checks passed ({} descriptors, next code {})",
            self.checks.len(),
            self.descriptors,
            self.expected_marker
        ));
        out
    }
}

struct DescriptorCounter(usize);

impl CatalogVisitor for DescriptorCounter {
    fn visit(&mut self, _descriptor: &ErrorDescriptor, _path: &DescriptorPath<'_>) {
        self.0 += 1;
    }
}

/// Runs every check in a single traversal.
///
/// `floor` seeds the max-code tracker; see [`resolve_floor`].
pub fn validate_catalog(
    catalog: &Catalog,
    ranges: &RangeTable,
    marker: &MarkerSource,
    floor: i64,
) -> ValidationReport {
    debug!(ranges = ranges.len(), floor, marker = %marker.origin(), "validating catalog");

    let mut counter = DescriptorCounter(0);
    let mut range = RangeValidator::new(ranges);
    let mut unique = UniquenessValidator::new();
    let mut tracker = MaxCodeTracker::new(floor);
    walk_all(
        catalog,
        &mut [&mut counter, &mut range, &mut unique, &mut tracker],
    );

    let report = ValidationReport {
        descriptors: counter.0,
        max_code: tracker.max(),
        expected_marker: tracker.expected_next(),
        checks: vec![range.finish(), unique.finish(), tracker.finish(marker)],
    };
    info!(
        descriptors = report.descriptors,
        passed = report.passed(),
        violations = report.violation_count(),
        "validation finished"
    );
    report
}
