//! Front-matter extraction.

use crate::document::{Document, FrontMatter, NodeKind};
use crate::visit::{Walk, walk};

/// Return the first front-matter block in document order.
///
/// Returns an empty mapping when the document has none. Later blocks are
/// ignored.
#[must_use]
pub fn extract_front_matter(doc: &Document) -> FrontMatter {
    let mut found = None;
    walk(doc, |_, node| match &node.kind {
        NodeKind::FrontMatter(front_matter) => {
            found = Some(front_matter.clone());
            Walk::Stop
        }
        _ => Walk::Continue,
    });
    found.unwrap_or_default()
}
