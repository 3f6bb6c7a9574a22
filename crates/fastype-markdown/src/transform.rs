//! In-place tree transforms.

use crate::document::{Document, NodeKind};
use crate::visit::{Walk, walk_mut};

/// Heading offset used by the publishing platform, which reserves `h1` and
/// `h2` for its own page chrome.
pub const PLATFORM_HEADING_OFFSET: u32 = 2;

/// Add `offset` to the level of every heading.
///
/// Levels are not clamped: a level-6 heading shifted by 2 becomes level 8.
pub fn shift_headings(doc: &mut Document, offset: u32) {
    let mut shifted = 0usize;
    walk_mut(doc, |_, kind| {
        if let NodeKind::Heading { level } = kind {
            *level = level.saturating_add(offset);
            shifted += 1;
        }
        Walk::Continue
    });
    tracing::trace!(offset, headings = shifted, "Shifted heading levels");
}
