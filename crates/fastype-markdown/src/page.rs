//! Document facade and batch rendering.
//!
//! [`MarkdownDocument`] bundles a parsed tree with the platform rules that
//! apply to it. [`render_markdown`] and [`render_batch`] run the whole
//! pipeline (parse, shift, render, collect) for one or many sources.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fastype_config::RenderConfig;
use rayon::prelude::*;

use crate::document::{Document, FrontMatter};
use crate::front_matter::extract_front_matter;
use crate::html::PostypeBackend;
use crate::images::collect_images;
use crate::parser::parse;
use crate::renderer::HtmlRenderer;
use crate::transform::shift_headings;

/// Error returned when a source file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Source file not found.
    #[error("Source file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    /// I/O error reading source file.
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
}

/// A parsed markdown document ready for publishing.
///
/// # Example
///
/// ```
/// use fastype_markdown::MarkdownDocument;
///
/// let mut doc = MarkdownDocument::parse("---\ntitle: Hello\n---\n# Intro\n\n![](a.png)");
/// assert_eq!(doc.render(), "<h3>Intro</h3>\n<p><img src=\"a.png\" alt=\"\" /></p>\n");
/// assert_eq!(doc.collect_images(), vec!["a.png"]);
/// assert_eq!(doc.collect_front_matter()["title"], vec!["Hello"]);
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownDocument {
    doc: Document,
    config: RenderConfig,
    /// Whether `config.heading_offset` has been applied to `doc`.
    shifted: bool,
}

impl MarkdownDocument {
    /// Parse markdown text with the default platform rules.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            doc: parse(text),
            config: RenderConfig::default(),
            shifted: false,
        }
    }

    /// Read and parse a markdown file.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::FileNotFound` if the file doesn't exist.
    /// Returns `RenderError::Io` if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RenderError::FileNotFound(path.to_path_buf()),
            _ => RenderError::Io(e),
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Loaded markdown");
        Ok(Self::parse(&text))
    }

    /// Replace the platform rules.
    ///
    /// The heading offset is applied on the first [`render`](Self::render),
    /// so the config must be set before that.
    #[must_use]
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render to platform HTML.
    ///
    /// The first call shifts every heading by the configured offset; later
    /// calls render the already shifted tree and return identical output.
    pub fn render(&mut self) -> String {
        if !self.shifted {
            shift_headings(&mut self.doc, self.config.heading_offset);
            self.shifted = true;
        }
        HtmlRenderer::new(PostypeBackend::new(self.config.clone())).render(&self.doc)
    }

    /// Image destinations in document order, duplicates included.
    #[must_use]
    pub fn collect_images(&self) -> Vec<String> {
        collect_images(&self.doc)
    }

    /// Front matter of the document, empty when there is none.
    #[must_use]
    pub fn collect_front_matter(&self) -> FrontMatter {
        extract_front_matter(&self.doc)
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn into_document(self) -> Document {
        self.doc
    }
}

/// Everything produced for a single source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Platform HTML fragment.
    pub html: String,
    /// Image destinations in document order.
    pub images: Vec<String>,
    /// Leading front matter.
    pub front_matter: FrontMatter,
}

/// Parse, shift, render, and collect a single source.
#[must_use]
pub fn render_markdown(text: &str, config: &RenderConfig) -> RenderOutput {
    let mut doc = MarkdownDocument::parse(text).with_config(config.clone());
    let html = doc.render();
    RenderOutput {
        html,
        images: doc.collect_images(),
        front_matter: doc.collect_front_matter(),
    }
}

/// Render independent sources in parallel.
///
/// Each source gets its own tree; results are in input order.
#[must_use]
pub fn render_batch<S>(sources: &[S], config: &RenderConfig) -> Vec<RenderOutput>
where
    S: AsRef<str> + Sync,
{
    let outputs: Vec<RenderOutput> = sources
        .par_iter()
        .map(|source| render_markdown(source.as_ref(), config))
        .collect();
    tracing::debug!(count = outputs.len(), "Rendered batch");
    outputs
}
