//! HTML backends.
//!
//! - [`StandardBackend`]: plain `CommonMark` HTML
//! - [`PostypeBackend`]: markup expected by the Postype editor

use std::fmt::Write;

use fastype_config::RenderConfig;

use crate::backend::RenderBackend;
use crate::languages::mime_type_for;
use crate::util::escape_html;

/// Plain `CommonMark` HTML backend.
///
/// Produces `<blockquote>`, `<code>`, and `<pre><code class="language-..">`
/// without any platform attributes.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardBackend;

impl RenderBackend for StandardBackend {}

/// Postype platform backend.
///
/// Produces:
/// - `<blockquote class="..">` with the configured class
/// - `rel` and `target` attributes on every link, internal anchors included
/// - inline code as a colored `<span>` wrapping `<em>`
/// - fenced code as a non-editable editor container whose `<pre>` carries the
///   editor MIME type in `data-type`
#[derive(Clone, Debug, Default)]
pub struct PostypeBackend {
    config: RenderConfig,
}

impl PostypeBackend {
    /// Create a backend with the given platform rules.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl RenderBackend for PostypeBackend {
    fn blockquote_start(&self, out: &mut String) {
        write!(
            out,
            r#"<blockquote class="{}">"#,
            escape_html(&self.config.blockquote_class)
        )
        .unwrap();
    }

    fn link_attributes(&self, out: &mut String) {
        write!(
            out,
            r#" rel="{}" target="{}""#,
            escape_html(&self.config.link_rel),
            escape_html(&self.config.link_target)
        )
        .unwrap();
    }

    fn inline_code(&self, code: &str, out: &mut String) {
        write!(
            out,
            r#"<span style="{}"><em>{}</em></span>"#,
            escape_html(&self.config.inline_code_style),
            escape_html(code)
        )
        .unwrap();
    }

    // The editor container is written inline, without surrounding line breaks.
    fn fenced_code_block(&self, info: &str, literal: &str, out: &mut String) {
        write!(
            out,
            r#"<div class="element-editor-container code" contenteditable="false"><pre data-type="{}">{}</pre></div>"#,
            mime_type_for(info),
            escape_html(literal)
        )
        .unwrap();
    }
}
