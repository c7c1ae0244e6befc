//! Per-category code ranges.
//!
//! The range table is configuration, defined independently of the catalog
//! (usually the `[ranges]` table of `errcat.toml`).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Inclusive interval `[min, max]` of codes owned by one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct CodeRange {
    pub min: i64,
    pub max: i64,
}

impl CodeRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, code: i64) -> bool {
        code >= self.min && code <= self.max
    }

    /// `min <= max`.
    pub const fn is_well_formed(&self) -> bool {
        self.min <= self.max
    }

    /// One below the first code of the range; seeds the max-code tracker so an
    /// empty category expects its first code as the next marker.
    pub const fn floor(&self) -> i64 {
        self.min.saturating_sub(1)
    }

    pub const fn overlaps(&self, other: &CodeRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Category name to code range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RangeTable {
    ranges: BTreeMap<String, CodeRange>,
}

impl RangeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, range: CodeRange) -> Option<CodeRange> {
        self.ranges.insert(category.into(), range)
    }

    #[must_use]
    pub fn with_range(mut self, category: impl Into<String>, min: i64, max: i64) -> Self {
        self.insert(category, CodeRange::new(min, max));
        self
    }

    pub fn get(&self, category: &str) -> Option<&CodeRange> {
        self.ranges.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodeRange)> {
        self.ranges.iter().map(|(name, range)| (name.as_str(), range))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The range with the smallest `min`.
    pub fn lowest(&self) -> Option<(&str, &CodeRange)> {
        self.iter().min_by_key(|(_, range)| range.min)
    }

    /// Every pair of categories whose ranges intersect.
    pub fn overlapping_pairs(&self) -> Vec<(&str, &str)> {
        let entries: Vec<_> = self.iter().collect();
        let mut pairs = Vec::new();
        for (i, (a_name, a)) in entries.iter().enumerate() {
            for (b_name, b) in &entries[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((*a_name, *b_name));
                }
            }
        }
        pairs
    }
}

impl<S: Into<String>> FromIterator<(S, CodeRange)> for RangeTable {
    fn from_iter<I: IntoIterator<Item = (S, CodeRange)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, range) in iter {
            table.insert(name, range);
        }
        table
    }
}

/// Parses `name=min:max`, the command-line form of a range.
pub fn parse_named_range(spec: &str) -> Result<(String, CodeRange), String> {
    let (name, bounds) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=MIN:MAX, got '{spec}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing category name in '{spec}'"));
    }
    let (min, max) = bounds
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX after '{name}=', got '{bounds}'"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid bound '{}' in '{spec}': {e}", value.trim()))
    };
    Ok((name.to_string(), CodeRange::new(parse(min)?, parse(max)?)))
}
