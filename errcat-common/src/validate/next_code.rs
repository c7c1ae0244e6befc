//! Next-code bookkeeping: the maintained marker equals the highest code plus one.

use super::{CheckKind, CheckResult, MarkerMismatch, Violation};
use crate::catalog::{Catalog, CatalogVisitor, CodeValue, DescriptorPath, ErrorDescriptor, walk};
use crate::marker::MarkerSource;
use crate::ranges::RangeTable;

/// Tracks the highest integer code, starting from a floor.
#[derive(Debug, Clone, Copy)]
pub struct MaxCodeTracker {
    max: i64,
}

impl MaxCodeTracker {
    pub fn new(floor: i64) -> Self {
        Self { max: floor }
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// The value the marker must hold.
    pub fn expected_next(&self) -> i64 {
        self.max.saturating_add(1)
    }

    /// Compares the marker against the tracked maximum.
    pub fn finish(&self, marker: &MarkerSource) -> CheckResult {
        let expected = self.expected_next();
        let outcome = marker.resolve().and_then(|marker| {
            if marker.next_code == expected {
                Ok(marker.next_code)
            } else {
                Err(MarkerMismatch::Drift {
                    found: marker.next_code,
                    expected,
                    max_code: self.max,
                })
            }
        });

        match outcome {
            Ok(found) => CheckResult::new(
                CheckKind::NextCodeMarker,
                format!("marker {found} is highest code {} + 1", self.max),
                Vec::new(),
            ),
            Err(mismatch) => {
                tracing::warn!(%mismatch, origin = %marker.origin(), "marker mismatch");
                CheckResult::new(
                    CheckKind::NextCodeMarker,
                    format!("expected 'Next error code: {expected}'"),
                    vec![Violation::from(mismatch)],
                )
            }
        }
    }
}

impl CatalogVisitor for MaxCodeTracker {
    fn visit(&mut self, descriptor: &ErrorDescriptor, _path: &DescriptorPath<'_>) {
        if let CodeValue::Integer(code) = *descriptor.code() {
            let code = i64::try_from(code).unwrap_or(if code < 0 { i64::MIN } else { i64::MAX });
            self.max = self.max.max(code);
        }
    }
}

/// Picks the floor that seeds the max-code tracker.
///
/// An explicit floor wins, then `min - 1` of the tracked category, then
/// `min - 1` of the lowest range, then 0.
pub fn resolve_floor(ranges: &RangeTable, category: Option<&str>, explicit: Option<i64>) -> i64 {
    if let Some(floor) = explicit {
        return floor;
    }
    category
        .and_then(|name| ranges.get(name))
        .or_else(|| ranges.lowest().map(|(_, range)| range))
        .map_or(0, |range| range.floor())
}

/// The code the next new descriptor should take.
pub fn next_free_code(catalog: &Catalog, floor: i64) -> i64 {
    let mut tracker = MaxCodeTracker::new(floor);
    walk(catalog, &mut tracker);
    tracker.expected_next()
}

/// Runs the marker check on its own.
pub fn check_next_code(catalog: &Catalog, marker: &MarkerSource, floor: i64) -> CheckResult {
    let mut tracker = MaxCodeTracker::new(floor);
    walk(catalog, &mut tracker);
    tracker.finish(marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_codes() -> Catalog {
        Catalog::from_json_value(json!({
            "compiler": { "errA": { "code": 1001 }, "errB": { "code": 1002 } }
        }))
        .expect("valid catalog")
    }

    fn text(marker: &str) -> MarkerSource {
        MarkerSource::Text(marker.to_string())
    }

    #[test]
    fn test_marker_matching_max_plus_one_passes() {
        let result = check_next_code(&two_codes(), &text("Next error code: 1003"), 1000);
        assert!(result.pass, "{}", result.format_full());
        assert_eq!(result.message, "marker 1003 is highest code 1002 + 1");
    }

    #[test]
    fn test_stale_marker_is_drift() {
        let result = check_next_code(&two_codes(), &text("Next error code: 1002"), 1000);
        assert_eq!(
            result.violations,
            vec![Violation::Marker(MarkerMismatch::Drift {
                found: 1002,
                expected: 1003,
                max_code: 1002,
            })]
        );
    }

    #[test]
    fn test_empty_catalog_expects_range_min() {
        let result = check_next_code(&Catalog::default(), &text("Next error code: 1001"), 1000);
        assert!(result.pass);
    }

    #[test]
    fn test_missing_marker_fails_with_message() {
        let result = check_next_code(&two_codes(), &text("nothing"), 1000);
        assert!(!result.pass);
        assert_eq!(result.message, "expected 'Next error code: 1003'");
        assert!(matches!(
            result.violations[0],
            Violation::Marker(MarkerMismatch::Missing { .. })
        ));
    }

    #[test]
    fn test_non_integer_codes_do_not_move_the_max() {
        let catalog = Catalog::from_json_value(json!({
            "compiler": { "errA": { "code": 1001 }, "odd": { "code": "9999" } }
        }))
        .expect("valid catalog");
        let mut tracker = MaxCodeTracker::new(1000);
        walk(&catalog, &mut tracker);
        assert_eq!(tracker.max(), 1001);
        assert_eq!(tracker.expected_next(), 1002);
    }

    #[test]
    fn test_code_beyond_i64_saturates_the_max() {
        let catalog = Catalog::from_json_str(
            r#"{"compiler": {"errA": {"code": 1001}, "huge": {"code": 18446744073709551615}}}"#,
        )
        .expect("valid catalog");
        assert_eq!(next_free_code(&catalog, 1000), i64::MAX);
        let result = check_next_code(&catalog, &text("Next error code: 1002"), 1000);
        assert!(!result.pass);
    }

    #[test]
    fn test_next_free_code() {
        assert_eq!(next_free_code(&two_codes(), 1000), 1003);
        assert_eq!(next_free_code(&Catalog::default(), 1000), 1001);
    }

    #[test]
    fn test_resolve_floor_precedence() {
        let ranges = RangeTable::new()
            .with_range("compiler", 1001, 1999)
            .with_range("runtime", 2000, 2999);

        assert_eq!(resolve_floor(&ranges, Some("runtime"), Some(5)), 5);
        assert_eq!(resolve_floor(&ranges, Some("runtime"), None), 1999);
        assert_eq!(resolve_floor(&ranges, Some("missing"), None), 1000);
        assert_eq!(resolve_floor(&ranges, None, None), 1000);
        assert_eq!(resolve_floor(&RangeTable::new(), None, None), 0);
    }
}
