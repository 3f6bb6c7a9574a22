//! Render backend trait for target-specific rendering.
//!
//! The generic [`HtmlRenderer`](crate::HtmlRenderer) handles the structure
//! shared by every target (paragraphs, lists, tables, inline formatting) and
//! delegates the elements whose markup differs between targets to a backend.

use std::fmt::Write;

use crate::util::{ensure_newline, escape_html};

/// Backend trait for target-specific rendering operations.
///
/// Default implementations produce plain `CommonMark` HTML.
pub trait RenderBackend {
    /// Render the block quote opening tag.
    fn blockquote_start(&self, out: &mut String) {
        out.push_str("<blockquote>");
    }

    /// Render extra link attributes.
    ///
    /// Called after `href` and `title` are written and before the tag is
    /// closed. Each attribute must be preceded by a space.
    fn link_attributes(&self, _out: &mut String) {}

    /// Render an inline code span.
    fn inline_code(&self, code: &str, out: &mut String) {
        write!(out, "<code>{}</code>", escape_html(code)).unwrap();
    }

    /// Render a fenced code block.
    ///
    /// # Arguments
    ///
    /// * `info` - Full fence info string (may be empty)
    /// * `literal` - Code content, including its trailing newline
    /// * `out` - Output buffer to write to
    fn fenced_code_block(&self, info: &str, literal: &str, out: &mut String) {
        ensure_newline(out);
        match info.split_whitespace().next() {
            Some(lang) => write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(literal)
            )
            .unwrap(),
            None => write!(out, "<pre><code>{}</code></pre>", escape_html(literal)).unwrap(),
        }
        ensure_newline(out);
    }

    /// Render an indented code block.
    fn indented_code_block(&self, literal: &str, out: &mut String) {
        ensure_newline(out);
        write!(out, "<pre><code>{}</code></pre>", escape_html(literal)).unwrap();
        ensure_newline(out);
    }
}
