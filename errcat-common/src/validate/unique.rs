//! Global uniqueness: no code is used twice anywhere in the catalog.

use super::{CheckKind, CheckResult, DuplicateCodeViolation, Violation};
use crate::catalog::{Catalog, CatalogVisitor, CodeValue, DescriptorPath, ErrorDescriptor, walk};
use std::collections::HashMap;

/// Tracks codes seen across all categories during one traversal.
///
/// Non-integer codes are not tracked; the range check reports them.
#[derive(Debug, Default)]
pub struct UniquenessValidator {
    seen: HashMap<i128, String>,
    checked: usize,
    violations: Vec<DuplicateCodeViolation>,
}

impl UniquenessValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> CheckResult {
        let message = if self.violations.is_empty() {
            format!("{} distinct code(s), no duplicates", self.seen.len())
        } else {
            format!(
                "{} duplicate code use(s) among {} descriptor(s)",
                self.violations.len(),
                self.checked
            )
        };
        CheckResult::new(
            CheckKind::UniqueCodes,
            message,
            self.violations.into_iter().map(Violation::from).collect(),
        )
    }
}

impl CatalogVisitor for UniquenessValidator {
    fn visit(&mut self, descriptor: &ErrorDescriptor, path: &DescriptorPath<'_>) {
        self.checked += 1;
        let CodeValue::Integer(code) = *descriptor.code() else {
            return;
        };

        match self.seen.get(&code) {
            Some(first_path) => {
                let violation = DuplicateCodeViolation {
                    path: path.to_string(),
                    code,
                    first_path: first_path.clone(),
                };
                tracing::warn!(%violation, "duplicate code");
                self.violations.push(violation);
            }
            None => {
                self.seen.insert(code, path.to_string());
            }
        }
    }
}

/// Runs the uniqueness check on its own.
pub fn check_uniqueness(catalog: &Catalog) -> CheckResult {
    let mut validator = UniquenessValidator::new();
    walk(catalog, &mut validator);
    validator.finish()
}
