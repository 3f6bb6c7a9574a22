//! Arena-backed document tree.
//!
//! All nodes live in a single `Vec` owned by [`Document`] and are addressed by
//! [`NodeId`]. Parent links are plain indices, so the tree has no shared
//! ownership and no reference cycles. Node 0 is always the root.

use std::collections::BTreeMap;

/// Front matter as key to ordered values.
///
/// A scalar field yields a single-element list.
pub type FrontMatter = BTreeMap<String, Vec<String>>;

/// Index of a node inside its [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Table column alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// Kind tag and payload of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    FrontMatter(FrontMatter),
    Paragraph,
    /// Heading level. 1..=6 after parsing; may be larger after a shift.
    Heading {
        level: u32,
    },
    BlockQuote,
    /// List; ordered when `start` is set.
    List {
        start: Option<u64>,
    },
    ListItem,
    FencedCodeBlock {
        info: String,
        literal: String,
    },
    IndentedCodeBlock {
        literal: String,
    },
    HtmlBlock {
        literal: String,
    },
    ThematicBreak,
    Table {
        alignments: Vec<Alignment>,
    },
    TableHead,
    TableRow,
    TableCell,
    Text {
        literal: String,
    },
    /// Inline code span.
    Code {
        literal: String,
    },
    HtmlInline {
        literal: String,
    },
    SoftBreak,
    HardBreak,
    Emphasis,
    StrongEmphasis,
    Link {
        destination: String,
        title: String,
    },
    /// Image; its children are the alt text.
    Image {
        destination: String,
        title: String,
    },
}

/// A single node in the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Parent of this node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Parsed markdown document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new node as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Kind and payload of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Mutable access to a node's payload.
    ///
    /// Only the kind is exposed so callers cannot detach or reorder children.
    pub fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.0].kind
    }

    /// Children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Concatenated literal text of a subtree.
    ///
    /// Breaks become spaces; markup is dropped. Used for image alt text.
    #[must_use]
    pub fn plain_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.kind(current) {
                NodeKind::Text { literal }
                | NodeKind::Code { literal }
                | NodeKind::HtmlInline { literal } => out.push_str(literal),
                NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
                _ => {}
            }
            stack.extend(self.children(current).iter().rev());
        }
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
