//! Error catalog data model.
//!
//! A catalog is an ordered tree: categories map entry names to further
//! categories or to leaf [`ErrorDescriptor`]s. Whether a node is a leaf is
//! decided once, when the catalog is built (see [`load`]), so traversal never
//! has to guess.
//!
//! ```text
//! compiler                      <- top-level category (owns a code range)
//! ├── unexpectedToken           <- descriptor { code: 1001, message: ... }
//! └── attributes                <- nested group, same range as `compiler`
//!     └── duplicateAttribute    <- descriptor { code: 1050, ... }
//! ```

pub mod load;
pub mod walk;

pub use walk::{CatalogVisitor, DescriptorPath, for_each_descriptor, walk, walk_all};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `code` field of a descriptor as authored.
///
/// Non-integer codes are kept instead of rejected so the range check can
/// report them alongside every other violation. Integral codes are held wide
/// enough that one beyond `i64` is still reported as out of range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CodeValue {
    /// An integral code.
    Integer(i128),
    /// Anything else, rendered as it appeared in the source.
    NonInteger(String),
}

impl CodeValue {
    /// The integral value, if any and if it fits in `i64`.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(code) => i64::try_from(*code).ok(),
            Self::NonInteger(_) => None,
        }
    }
}

impl fmt::Display for CodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(code) => write!(f, "{code}"),
            Self::NonInteger(raw) => write!(f, "{raw}"),
        }
    }
}

impl From<i64> for CodeValue {
    fn from(code: i64) -> Self {
        Self::Integer(code.into())
    }
}

/// Diagnostic level attached to a descriptor.
///
/// The set is open: levels errcat does not know are kept as written, and a
/// non-string level keeps its JSON text. Validation never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Error,
    Warning,
    Info,
    Fatal,
    Log,
    Other(String),
}

impl Level {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Fatal => "fatal",
            Self::Log => "log",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "error" => Self::Error,
            "warning" | "warn" => Self::Warning,
            "info" => Self::Info,
            "fatal" => Self::Fatal,
            "log" => Self::Log,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        match level {
            Level::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl JsonSchema for Level {
    fn schema_name() -> String {
        "Level".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        String::json_schema(generator)
    }
}

/// A leaf record of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorDescriptor {
    code: CodeValue,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<Level>,
}

impl ErrorDescriptor {
    /// Descriptor with an integral code.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self::with_code_value(CodeValue::Integer(code.into()), message)
    }

    /// Descriptor with an arbitrary code value.
    pub fn with_code_value(code: CodeValue, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            level: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    pub fn code(&self) -> &CodeValue {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }
}

/// A node of the catalog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    Descriptor(ErrorDescriptor),
    Category(Category),
}

impl From<ErrorDescriptor> for CatalogNode {
    fn from(descriptor: ErrorDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<Category> for CatalogNode {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

/// Ordered mapping of entry name to node.
///
/// Entries keep insertion order; traversal and duplicate reporting follow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    entries: Vec<(String, CatalogNode)>,
}

impl Category {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. A repeated name is kept as a separate entry.
    pub fn push(&mut self, name: impl Into<String>, node: impl Into<CatalogNode>) {
        self.entries.push((name.into(), node.into()));
    }

    /// Builder form of [`Category::push`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, node: impl Into<CatalogNode>) -> Self {
        self.push(name, node);
        self
    }

    pub fn entries(&self) -> &[(String, CatalogNode)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The root of an error catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    root: Category,
}

impl Catalog {
    pub fn new(root: Category) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Category {
        &self.root
    }

    /// Names of the top-level categories, in order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.root.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Number of leaf descriptors anywhere in the tree.
    pub fn descriptor_count(&self) -> usize {
        let mut count = 0;
        for_each_descriptor(self, |_, _| count += 1);
        count
    }

    /// Flattens the catalog into rows in traversal order.
    pub fn rows(&self) -> Vec<CatalogRow> {
        let mut rows = Vec::new();
        for_each_descriptor(self, |descriptor, path| {
            rows.push(CatalogRow {
                path: path.to_string(),
                category: path.category().to_string(),
                code: descriptor.code().clone(),
                level: descriptor.level().cloned(),
                message: descriptor.message().to_string(),
            });
        });
        rows
    }
}

/// One flattened descriptor, as printed by `errcat list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogRow {
    /// Dotted path from the root (e.g. `compiler.attributes.duplicate`).
    pub path: String,
    /// Top-level category the descriptor belongs to.
    pub category: String,
    pub code: CodeValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    pub message: String,
}
