//! Depth-first traversal of a catalog.
//!
//! Visitors receive each descriptor together with its [`DescriptorPath`].
//! Several visitors can share a single pass through [`walk_all`], which is how
//! the combined validation run collects range, uniqueness and max-code facts.

use super::{Catalog, CatalogNode, Category, ErrorDescriptor};
use std::fmt;

/// Keys from the catalog root down to a descriptor.
#[derive(Debug, Clone, Copy)]
pub struct DescriptorPath<'p> {
    segments: &'p [&'p str],
}

impl<'p> DescriptorPath<'p> {
    pub fn new(segments: &'p [&'p str]) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &'p [&'p str] {
        self.segments
    }

    /// The top-level category, i.e. the first key of the path.
    pub fn category(&self) -> &'p str {
        self.segments.first().copied().unwrap_or_default()
    }

    /// The descriptor's own key.
    pub fn name(&self) -> &'p str {
        self.segments.last().copied().unwrap_or_default()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for DescriptorPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Receives every descriptor of a catalog in traversal order.
pub trait CatalogVisitor {
    fn visit(&mut self, descriptor: &ErrorDescriptor, path: &DescriptorPath<'_>);
}

/// Walks the catalog with a single visitor.
pub fn walk(catalog: &Catalog, visitor: &mut dyn CatalogVisitor) {
    walk_all(catalog, &mut [visitor]);
}

/// Walks the catalog once, handing each descriptor to every visitor in order.
pub fn walk_all(catalog: &Catalog, visitors: &mut [&mut dyn CatalogVisitor]) {
    let mut segments = Vec::new();
    walk_category(catalog.root(), &mut segments, visitors);
}

fn walk_category<'a>(
    category: &'a Category,
    segments: &mut Vec<&'a str>,
    visitors: &mut [&mut dyn CatalogVisitor],
) {
    for (name, node) in category.entries() {
        segments.push(name.as_str());
        match node {
            CatalogNode::Descriptor(descriptor) => {
                let path = DescriptorPath::new(segments);
                tracing::trace!(path = %path, code = %descriptor.code(), "visit descriptor");
                for visitor in visitors.iter_mut() {
                    visitor.visit(descriptor, &path);
                }
            }
            CatalogNode::Category(child) => walk_category(child, segments, visitors),
        }
        segments.pop();
    }
}

struct FnVisitor<F>(F);

impl<F> CatalogVisitor for FnVisitor<F>
where
    F: FnMut(&ErrorDescriptor, &DescriptorPath<'_>),
{
    fn visit(&mut self, descriptor: &ErrorDescriptor, path: &DescriptorPath<'_>) {
        (self.0)(descriptor, path);
    }
}

/// Calls `f` for every descriptor in traversal order.
pub fn for_each_descriptor<F>(catalog: &Catalog, f: F)
where
    F: FnMut(&ErrorDescriptor, &DescriptorPath<'_>),
{
    walk(catalog, &mut FnVisitor(f));
}
