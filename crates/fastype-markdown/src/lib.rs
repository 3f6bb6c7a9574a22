//! Markdown to Postype HTML conversion.
//!
//! The pipeline is split into small pure steps over an arena-backed
//! [`Document`]:
//!
//! - [`parse`]: markdown with tables and leading YAML front matter
//! - [`shift_headings`]: in-place heading level offset
//! - [`extract_front_matter`] and [`collect_images`]: read-only traversals
//! - [`HtmlRenderer`]: single-pass HTML output through a [`RenderBackend`]
//!
//! # Architecture
//!
//! The renderer handles shared structure (paragraphs, lists, tables, inline
//! formatting) and delegates platform-specific elements to a backend:
//! - [`PostypeBackend`]: block quote class, link attributes, styled inline
//!   code, and editor containers for fenced code
//! - [`StandardBackend`]: plain `CommonMark` HTML
//!
//! [`MarkdownDocument`] ties the steps together for a single source and
//! [`render_batch`] renders many sources in parallel.
//!
//! # Example
//!
//! ```
//! use fastype_markdown::{PLATFORM_HEADING_OFFSET, collect_images, parse, render, shift_headings};
//!
//! let mut doc = parse("# Title\n\n> **Bold** [link](https://example.com)");
//! shift_headings(&mut doc, PLATFORM_HEADING_OFFSET);
//! let html = render(&doc);
//!
//! assert!(html.starts_with("<h3>Title</h3>"));
//! assert!(html.contains(r#"<blockquote class="blockquote-type2">"#));
//! assert!(html.contains(r#"rel="nofollow noopener noreferrer" target="_blank""#));
//! assert!(collect_images(&doc).is_empty());
//! ```

mod backend;
mod document;
mod front_matter;
mod html;
mod images;
mod languages;
mod page;
mod parser;
mod renderer;
mod transform;
mod util;
mod visit;
mod yaml;

pub use backend::RenderBackend;
pub use document::{Alignment, Document, FrontMatter, Node, NodeId, NodeKind};
pub use fastype_config::RenderConfig;
pub use front_matter::extract_front_matter;
pub use html::{PostypeBackend, StandardBackend};
pub use images::collect_images;
pub use languages::{DEFAULT_MIME_TYPE, LANGUAGE_MIME_TYPES, mime_type_for};
pub use page::{MarkdownDocument, RenderError, RenderOutput, render_batch, render_markdown};
pub use parser::parse;
pub use renderer::HtmlRenderer;
pub use transform::{PLATFORM_HEADING_OFFSET, shift_headings};
pub use util::escape_html;
pub use visit::{Walk, walk, walk_from, walk_mut};

/// Render a document with the platform backend and default rules.
///
/// Headings are rendered at their stored level; apply [`shift_headings`]
/// first to reproduce the platform layout.
#[must_use]
pub fn render(doc: &Document) -> String {
    HtmlRenderer::new(PostypeBackend::default()).render(doc)
}
