//! Range containment: every code is an integer inside its category's range.

use super::{CheckKind, CheckResult, RangeViolation, Violation};
use crate::catalog::{Catalog, CatalogVisitor, CodeValue, DescriptorPath, ErrorDescriptor, walk};
use crate::ranges::RangeTable;

/// Collects range violations during a traversal.
#[derive(Debug)]
pub struct RangeValidator<'r> {
    ranges: &'r RangeTable,
    checked: usize,
    violations: Vec<RangeViolation>,
}

impl<'r> RangeValidator<'r> {
    pub fn new(ranges: &'r RangeTable) -> Self {
        Self {
            ranges,
            checked: 0,
            violations: Vec::new(),
        }
    }

    pub fn finish(self) -> CheckResult {
        let message = if self.violations.is_empty() {
            format!(
                "{} code(s) inside their category ranges",
                self.checked
            )
        } else {
            format!(
                "{} of {} code(s) violate their category ranges",
                self.violations.len(),
                self.checked
            )
        };
        CheckResult::new(
            CheckKind::CodeRange,
            message,
            self.violations.into_iter().map(Violation::from).collect(),
        )
    }
}

impl CatalogVisitor for RangeValidator<'_> {
    fn visit(&mut self, descriptor: &ErrorDescriptor, path: &DescriptorPath<'_>) {
        self.checked += 1;
        let category = path.category();

        let violation = match (descriptor.code(), self.ranges.get(category)) {
            (CodeValue::NonInteger(raw), _) => Some(RangeViolation::NotInteger {
                path: path.to_string(),
                raw: raw.clone(),
            }),
            (CodeValue::Integer(_), None) => Some(RangeViolation::UnknownCategory {
                path: path.to_string(),
                category: category.to_string(),
            }),
            (CodeValue::Integer(code), Some(range))
                if !i64::try_from(*code).is_ok_and(|code| range.contains(code)) =>
            {
                Some(RangeViolation::OutOfRange {
                    path: path.to_string(),
                    category: category.to_string(),
                    code: *code,
                    range: *range,
                })
            }
            (CodeValue::Integer(_), Some(_)) => None,
        };

        if let Some(violation) = violation {
            tracing::warn!(%violation, "range violation");
            self.violations.push(violation);
        }
    }
}

/// Runs the range check on its own.
pub fn check_ranges(catalog: &Catalog, ranges: &RangeTable) -> CheckResult {
    let mut validator = RangeValidator::new(ranges);
    walk(catalog, &mut validator);
    validator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compiler_ranges() -> RangeTable {
        RangeTable::new().with_range("compiler", 1001, 1999)
    }

    #[test]
    fn test_codes_inside_range_pass() {
        let catalog = Catalog::from_json_value(json!({
            "compiler": { "errA": { "code": 1001 }, "errB": { "code": 1999 } }
        }))
        .expect("valid catalog");
        let result = check_ranges(&catalog, &compiler_ranges());
        assert!(result.pass, "{}", result.format_full());
        assert_eq!(result.message, "2 code(s) inside their category ranges");
    }

    #[test]
    fn test_all_violations_are_collected() {
        let catalog = Catalog::from_json_value(json!({
            "compiler": {
                "low": { "code": 1000 },
                "ok": { "code": 1500 },
                "high": { "code": 2000 },
                "text": { "code": "1200" }
            },
            "runtime": { "errR": { "code": 3001 } }
        }))
        .expect("valid catalog");

        let result = check_ranges(&catalog, &compiler_ranges());
        assert!(!result.pass);
        assert_eq!(result.violations.len(), 4);

        let paths: Vec<_> = result
            .violations
            .iter()
            .map(|v| match v {
                Violation::Range(r) => r.path().to_string(),
                other => panic!("unexpected violation {other:?}"),
            })
            .collect();
        assert_eq!(
            paths,
            vec!["compiler.low", "compiler.high", "compiler.text", "runtime.errR"]
        );
        assert!(matches!(
            &result.violations[3],
            Violation::Range(RangeViolation::UnknownCategory { category, .. }) if category == "runtime"
        ));
    }

    #[test]
    fn test_nested_descriptor_uses_top_level_range() {
        let catalog = Catalog::from_json_value(json!({
            "compiler": { "subgroup": { "deeper": { "errD": { "code": 2500 } } } }
        }))
        .expect("valid catalog");
        let result = check_ranges(&catalog, &compiler_ranges());
        assert_eq!(
            result.violations,
            vec![Violation::Range(RangeViolation::OutOfRange {
                path: "compiler.subgroup.deeper.errD".to_string(),
                category: "compiler".to_string(),
                code: 2500,
                range: crate::ranges::CodeRange::new(1001, 1999),
            })]
        );
    }

    #[test]
    fn test_code_beyond_i64_is_out_of_range() {
        let catalog = Catalog::from_json_str(
            r#"{"compiler": {"huge": {"code": 18446744073709551615}}}"#,
        )
        .expect("valid catalog");
        let result = check_ranges(&catalog, &compiler_ranges());
        assert!(matches!(
            result.violations.as_slice(),
            [Violation::Range(RangeViolation::OutOfRange { code, .. })]
                if *code == i128::from(u64::MAX)
        ));
        assert_eq!(
            result.violations[0].to_string(),
            "compiler.huge: code 18446744073709551615 is outside the 'compiler' range [1001, 1999]"
        );
    }

    #[test]
    fn test_empty_catalog_passes() {
        let result = check_ranges(&Catalog::default(), &compiler_ranges());
        assert!(result.pass);
        assert!(result.violations.is_empty());
    }
}
