//! errcat-common: error-code catalog model and registry checks.
//!
//! A catalog is a nested mapping of categories to error descriptors. errcat
//! enforces three invariants over it:
//!
//! - every code lies inside the range registered for its top-level category
//! - no code is used twice anywhere in the catalog
//! - the maintained `Next error code: N` marker equals the highest code + 1
//!
//! ```ignore
//! use errcat_common::{Catalog, MarkerSource, RangeTable, validate_catalog};
//!
//! let catalog = Catalog::load("errors.json".as_ref())?;
//! let ranges = RangeTable::new().with_range("compiler", 1001, 1999);
//! let marker = MarkerSource::for_path("ERRORS.md");
//! let report = validate_catalog(&catalog, &ranges, &marker, 1000);
//! assert!(report.passed(), "{}", report.format_text());
//! ```

pub mod catalog;
pub mod config;
pub mod errors;
pub mod logging;
pub mod marker;
pub mod ranges;
pub mod schema;
pub mod testing;
pub mod validate;

pub use catalog::{
    Catalog, CatalogNode, CatalogRow, CatalogVisitor, Category, CodeValue, DescriptorPath,
    ErrorDescriptor, Level, for_each_descriptor, walk, walk_all,
};
pub use config::{ConfigOverrides, ConfigSource, ErrcatConfig, Sourced};
pub use errors::{ErrcatError, ErrorCategory, ErrorCode, ErrorEntry, Result};
pub use logging::{LogConfig, LogFormat, LoggingGuards, init_logging};
pub use marker::{Marker, MarkerSource, marker_line};
pub use ranges::{CodeRange, RangeTable, parse_named_range};
pub use validate::{
    CheckKind, CheckResult, DuplicateCodeViolation, MarkerMismatch, RangeViolation,
    ValidationReport, Violation, check_next_code, check_ranges, check_uniqueness, next_free_code,
    resolve_floor, validate_catalog,
};
