//! Depth-first traversal over a [`Document`].
//!
//! A visitor is a closure that matches on the node kinds it cares about and
//! returns [`Walk::Continue`] for everything else, which descends into the
//! node's children. Traversal is pre-order and iterative, so deeply nested
//! input cannot exhaust the call stack.
//!
//! ```
//! use fastype_markdown::{NodeKind, Walk, parse, walk};
//!
//! let doc = parse("> *a* and *b*");
//! let mut emphasis = 0;
//! walk(&doc, |_, node| {
//!     if matches!(node.kind, NodeKind::Emphasis) {
//!         emphasis += 1;
//!     }
//!     Walk::Continue
//! });
//! assert_eq!(emphasis, 2);
//! ```

use crate::document::{Document, Node, NodeId, NodeKind};

/// What the traversal should do after visiting a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children.
    Continue,
    /// Move on to the next sibling without visiting children.
    SkipChildren,
    /// End the traversal.
    Stop,
}

/// Visit every node reachable from the root in document order.
pub fn walk<F>(doc: &Document, visit: F)
where
    F: FnMut(NodeId, &Node) -> Walk,
{
    walk_from(doc, doc.root(), visit);
}

/// Visit every node of the subtree rooted at `start` in document order.
pub fn walk_from<F>(doc: &Document, start: NodeId, mut visit: F)
where
    F: FnMut(NodeId, &Node) -> Walk,
{
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        let node = doc.node(id);
        match visit(id, node) {
            Walk::Continue => stack.extend(node.children().iter().rev()),
            Walk::SkipChildren => {}
            Walk::Stop => return,
        }
    }
}

/// Visit every node in document order with mutable access to its payload.
///
/// Only the visited node's [`NodeKind`] is exposed; the tree shape is fixed
/// for the duration of the walk.
pub fn walk_mut<F>(doc: &mut Document, mut visit: F)
where
    F: FnMut(NodeId, &mut NodeKind) -> Walk,
{
    let mut stack = vec![doc.root()];
    while let Some(id) = stack.pop() {
        match visit(id, doc.kind_mut(id)) {
            Walk::Continue => stack.extend(doc.children(id).iter().rev()),
            Walk::SkipChildren => {}
            Walk::Stop => return,
        }
    }
}
