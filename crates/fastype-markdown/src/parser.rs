//! Markdown to [`Document`] parsing.
//!
//! pulldown-cmark produces a flat event stream; [`TreeBuilder`] folds it into
//! the arena with a stack of open nodes. Tags the document model does not
//! represent are transparent: their content attaches to the enclosing node.
//!
//! A leading `---` block is split off before pulldown-cmark sees the text and
//! parsed as YAML. Anything that is not a closed block holding a YAML mapping
//! is left in place and parsed as ordinary markdown.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::document::{Alignment, Document, FrontMatter, NodeId, NodeKind};
use crate::yaml::front_matter_from_yaml;

/// Parse markdown into a document tree.
///
/// Tables and a leading front-matter block are always recognized. Parsing
/// never fails: malformed constructs become paragraphs and text.
#[must_use]
pub fn parse(text: &str) -> Document {
    let mut doc = Document::new();

    let body = match split_front_matter(text) {
        Some((front_matter, rest)) => {
            doc.append(doc.root(), NodeKind::FrontMatter(front_matter));
            rest
        }
        None => text,
    };

    let mut builder = TreeBuilder::new(&mut doc);
    for event in Parser::new_ext(body, Options::ENABLE_TABLES) {
        builder.event(event);
    }

    tracing::trace!(nodes = doc.len(), input_len = text.len(), "Parsed markdown");
    doc
}

/// Split a leading front-matter block from the text.
///
/// Returns the parsed block and the remaining markdown, or `None` when the
/// text does not start with a well-formed block.
fn split_front_matter(text: &str) -> Option<(FrontMatter, &str)> {
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if !is_delimiter(first, false) {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if is_delimiter(line, true) {
            let yaml = &text[yaml_start..offset];
            let rest = &text[offset + line.len()..];
            let Some(front_matter) = front_matter_from_yaml(yaml) else {
                tracing::debug!("Front matter is not a YAML mapping, parsing as markdown");
                return None;
            };
            return Some((front_matter, rest));
        }
        offset += line.len();
    }

    tracing::debug!("Unclosed front matter block, parsing as markdown");
    None
}

/// Whether a line is a front-matter fence. Closing fences may also be `...`.
fn is_delimiter(line: &str, closing: bool) -> bool {
    let trimmed = line.trim_end();
    trimmed == "---" || (closing && trimmed == "...")
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(alignment: pulldown_cmark::Alignment) -> Self {
        match alignment {
            pulldown_cmark::Alignment::None => Self::None,
            pulldown_cmark::Alignment::Left => Self::Left,
            pulldown_cmark::Alignment::Center => Self::Center,
            pulldown_cmark::Alignment::Right => Self::Right,
        }
    }
}

fn heading_level_to_num(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Folds pulldown-cmark events into a [`Document`].
struct TreeBuilder<'d> {
    doc: &'d mut Document,
    /// Open nodes. Transparent tags push their enclosing node again.
    stack: Vec<NodeId>,
}

impl<'d> TreeBuilder<'d> {
    fn new(doc: &'d mut Document) -> Self {
        let root = doc.root();
        Self {
            doc,
            stack: vec![root],
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or_else(|| self.doc.root())
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.leaf(NodeKind::Code {
                literal: code.to_string(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => self.html(&html),
            Event::SoftBreak => self.leaf(NodeKind::SoftBreak),
            Event::HardBreak => self.leaf(NodeKind::HardBreak),
            Event::Rule => self.leaf(NodeKind::ThematicBreak),
            Event::FootnoteReference(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                self.text(&text);
            }
            Event::TaskListMarker(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Paragraph => Some(NodeKind::Paragraph),
            Tag::Heading { level, .. } => Some(NodeKind::Heading {
                level: heading_level_to_num(level),
            }),
            Tag::BlockQuote(_) => Some(NodeKind::BlockQuote),
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => Some(NodeKind::FencedCodeBlock {
                info: info.to_string(),
                literal: String::new(),
            }),
            Tag::CodeBlock(CodeBlockKind::Indented) => Some(NodeKind::IndentedCodeBlock {
                literal: String::new(),
            }),
            Tag::HtmlBlock => Some(NodeKind::HtmlBlock {
                literal: String::new(),
            }),
            Tag::List(start) => Some(NodeKind::List { start }),
            Tag::Item => Some(NodeKind::ListItem),
            Tag::Table(alignments) => Some(NodeKind::Table {
                alignments: alignments.into_iter().map(Alignment::from).collect(),
            }),
            Tag::TableHead => Some(NodeKind::TableHead),
            Tag::TableRow => Some(NodeKind::TableRow),
            Tag::TableCell => Some(NodeKind::TableCell),
            Tag::Emphasis => Some(NodeKind::Emphasis),
            Tag::Strong => Some(NodeKind::StrongEmphasis),
            Tag::Link {
                dest_url, title, ..
            } => Some(NodeKind::Link {
                destination: dest_url.to_string(),
                title: title.to_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => Some(NodeKind::Image {
                destination: dest_url.to_string(),
                title: title.to_string(),
            }),
            // Not enabled in the parser options; kept transparent.
            Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => None,
        };

        let parent = self.current();
        let id = match kind {
            Some(kind) => self.doc.append(parent, kind),
            None => parent,
        };
        self.stack.push(id);
    }

    fn end_tag(&mut self, _tag: TagEnd) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn text(&mut self, text: &str) {
        let current = self.current();
        match self.doc.kind_mut(current) {
            NodeKind::FencedCodeBlock { literal, .. }
            | NodeKind::IndentedCodeBlock { literal }
            | NodeKind::HtmlBlock { literal } => literal.push_str(text),
            _ => self.leaf(NodeKind::Text {
                literal: text.to_owned(),
            }),
        }
    }

    fn html(&mut self, html: &str) {
        let current = self.current();
        if let NodeKind::HtmlBlock { literal } = self.doc.kind_mut(current) {
            literal.push_str(html);
        } else {
            self.leaf(NodeKind::HtmlInline {
                literal: html.to_owned(),
            });
        }
    }

    fn leaf(&mut self, kind: NodeKind) {
        let parent = self.current();
        self.doc.append(parent, kind);
    }
}
