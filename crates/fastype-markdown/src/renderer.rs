//! Generic HTML renderer with pluggable backend.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::document::{Alignment, Document, NodeId, NodeKind};
use crate::util::{ensure_newline, escape_html};

/// Pending work for the iterative traversal.
enum Step {
    Enter(NodeId),
    Exit(NodeId),
}

/// Generic HTML renderer with pluggable backend.
///
/// Handles the elements every target shares (paragraphs, headings, lists,
/// tables, inline formatting) and delegates the rest to the [`RenderBackend`].
/// Rendering is a single depth-first pass in document order driven by an
/// explicit stack, so nesting depth is limited only by memory.
#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer<B: RenderBackend> {
    backend: B,
}

impl<B: RenderBackend> HtmlRenderer<B> {
    /// Create a renderer for the given backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render a document to an HTML fragment.
    ///
    /// An empty document renders to an empty string.
    #[must_use]
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::with_capacity(4096);
        let mut stack = vec![Step::Enter(doc.root())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id) => {
                    if self.enter(doc, id, &mut out) {
                        stack.push(Step::Exit(id));
                        stack.extend(doc.children(id).iter().rev().map(|&c| Step::Enter(c)));
                    }
                }
                Step::Exit(id) => Self::exit(doc, id, &mut out),
            }
        }

        tracing::debug!(nodes = doc.len(), output_len = out.len(), "Rendered document");
        out
    }

    /// Write the opening markup of a node.
    ///
    /// Returns `true` when the children should be rendered and the node
    /// closed afterwards. Leaves and images are written completely here.
    fn enter(&self, doc: &Document, id: NodeId, out: &mut String) -> bool {
        match doc.kind(id) {
            NodeKind::Document => true,
            NodeKind::FrontMatter(_) => false,
            NodeKind::Paragraph => {
                ensure_newline(out);
                out.push_str("<p>");
                true
            }
            NodeKind::Heading { level } => {
                ensure_newline(out);
                write!(out, "<h{level}>").unwrap();
                true
            }
            NodeKind::BlockQuote => {
                ensure_newline(out);
                self.backend.blockquote_start(out);
                out.push('\n');
                true
            }
            NodeKind::List { start } => {
                ensure_newline(out);
                match start {
                    Some(1) => out.push_str("<ol>"),
                    Some(n) => write!(out, r#"<ol start="{n}">"#).unwrap(),
                    None => out.push_str("<ul>"),
                }
                out.push('\n');
                true
            }
            NodeKind::ListItem => {
                ensure_newline(out);
                out.push_str("<li>");
                true
            }
            NodeKind::FencedCodeBlock { info, literal } => {
                self.backend.fenced_code_block(info, literal, out);
                false
            }
            NodeKind::IndentedCodeBlock { literal } => {
                self.backend.indented_code_block(literal, out);
                false
            }
            NodeKind::HtmlBlock { literal } => {
                ensure_newline(out);
                out.push_str(literal);
                ensure_newline(out);
                false
            }
            NodeKind::ThematicBreak => {
                ensure_newline(out);
                out.push_str("<hr />");
                ensure_newline(out);
                false
            }
            NodeKind::Table { .. } => {
                ensure_newline(out);
                out.push_str("<table>\n");
                true
            }
            NodeKind::TableHead => {
                out.push_str("<thead>\n<tr>\n");
                true
            }
            NodeKind::TableRow => {
                if is_first_body_row(doc, id) {
                    out.push_str("<tbody>\n");
                }
                out.push_str("<tr>\n");
                true
            }
            NodeKind::TableCell => {
                out.push('<');
                out.push_str(cell_tag(doc, id));
                match cell_alignment(doc, id) {
                    Alignment::None => {}
                    Alignment::Left => out.push_str(r#" align="left""#),
                    Alignment::Center => out.push_str(r#" align="center""#),
                    Alignment::Right => out.push_str(r#" align="right""#),
                }
                out.push('>');
                true
            }
            NodeKind::Text { literal } => {
                out.push_str(&escape_html(literal));
                false
            }
            NodeKind::Code { literal } => {
                self.backend.inline_code(literal, out);
                false
            }
            NodeKind::HtmlInline { literal } => {
                out.push_str(literal);
                false
            }
            NodeKind::SoftBreak => {
                out.push('\n');
                false
            }
            NodeKind::HardBreak => {
                out.push_str("<br />\n");
                false
            }
            NodeKind::Emphasis => {
                out.push_str("<em>");
                true
            }
            NodeKind::StrongEmphasis => {
                out.push_str("<strong>");
                true
            }
            NodeKind::Link { destination, title } => {
                write!(out, r#"<a href="{}""#, escape_html(destination)).unwrap();
                if !title.is_empty() {
                    write!(out, r#" title="{}""#, escape_html(title)).unwrap();
                }
                self.backend.link_attributes(out);
                out.push('>');
                true
            }
            NodeKind::Image { destination, title } => {
                write!(
                    out,
                    r#"<img src="{}" alt="{}""#,
                    escape_html(destination),
                    escape_html(&doc.plain_text(id))
                )
                .unwrap();
                if !title.is_empty() {
                    write!(out, r#" title="{}""#, escape_html(title)).unwrap();
                }
                out.push_str(" />");
                false
            }
        }
    }

    /// Write the closing markup of a container node.
    fn exit(doc: &Document, id: NodeId, out: &mut String) {
        match doc.kind(id) {
            NodeKind::Paragraph => {
                out.push_str("</p>");
                ensure_newline(out);
            }
            NodeKind::Heading { level } => {
                write!(out, "</h{level}>").unwrap();
                ensure_newline(out);
            }
            NodeKind::BlockQuote => {
                ensure_newline(out);
                out.push_str("</blockquote>");
                ensure_newline(out);
            }
            NodeKind::List { start } => {
                ensure_newline(out);
                out.push_str(if start.is_some() { "</ol>" } else { "</ul>" });
                ensure_newline(out);
            }
            NodeKind::ListItem => {
                out.push_str("</li>");
                ensure_newline(out);
            }
            NodeKind::Table { .. } => {
                if has_body_rows(doc, id) {
                    out.push_str("</tbody>\n");
                }
                out.push_str("</table>");
                ensure_newline(out);
            }
            NodeKind::TableHead => out.push_str("</tr>\n</thead>\n"),
            NodeKind::TableRow => out.push_str("</tr>\n"),
            NodeKind::TableCell => {
                writeln!(out, "</{}>", cell_tag(doc, id)).unwrap();
            }
            NodeKind::Emphasis => out.push_str("</em>"),
            NodeKind::StrongEmphasis => out.push_str("</strong>"),
            NodeKind::Link { .. } => out.push_str("</a>"),
            NodeKind::Document
            | NodeKind::FrontMatter(_)
            | NodeKind::FencedCodeBlock { .. }
            | NodeKind::IndentedCodeBlock { .. }
            | NodeKind::HtmlBlock { .. }
            | NodeKind::ThematicBreak
            | NodeKind::Text { .. }
            | NodeKind::Code { .. }
            | NodeKind::HtmlInline { .. }
            | NodeKind::SoftBreak
            | NodeKind::HardBreak
            | NodeKind::Image { .. } => {}
        }
    }
}

/// `th` for header cells, `td` otherwise.
fn cell_tag(doc: &Document, cell: NodeId) -> &'static str {
    match doc.parent(cell).map(|row| doc.kind(row)) {
        Some(NodeKind::TableHead) => "th",
        _ => "td",
    }
}

/// Column alignment of a cell, looked up on the enclosing table.
fn cell_alignment(doc: &Document, cell: NodeId) -> Alignment {
    column_alignment(doc, cell).unwrap_or_default()
}

fn column_alignment(doc: &Document, cell: NodeId) -> Option<Alignment> {
    let row = doc.parent(cell)?;
    let NodeKind::Table { alignments } = doc.kind(doc.parent(row)?) else {
        return None;
    };
    let column = doc.children(row).iter().position(|&c| c == cell)?;
    alignments.get(column).copied()
}

fn is_first_body_row(doc: &Document, row: NodeId) -> bool {
    let Some(table) = doc.parent(row) else {
        return false;
    };
    doc.children(table)
        .iter()
        .find(|&&c| matches!(doc.kind(c), NodeKind::TableRow))
        == Some(&row)
}

fn has_body_rows(doc: &Document, table: NodeId) -> bool {
    doc.children(table)
        .iter()
        .any(|&c| matches!(doc.kind(c), NodeKind::TableRow))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::html::{PostypeBackend, StandardBackend};
    use crate::parser::parse;
    use crate::transform::{PLATFORM_HEADING_OFFSET, shift_headings};

    fn postype(markdown: &str) -> String {
        let mut doc = parse(markdown);
        shift_headings(&mut doc, PLATFORM_HEADING_OFFSET);
        HtmlRenderer::new(PostypeBackend::default()).render(&doc)
    }

    fn standard(markdown: &str) -> String {
        HtmlRenderer::new(StandardBackend).render(&parse(markdown))
    }

    #[test]
    fn test_round_trip_heading_image_code() {
        let html = postype("# Title\n\n![alt](http://x/img.png)\n\n```js\nconsole.log(1)\n```");
        assert_eq!(
            html,
            "<h3>Title</h3>\n\
             <p><img src=\"http://x/img.png\" alt=\"alt\" /></p>\n\
             <div class=\"element-editor-container code\" contenteditable=\"false\">\
             <pre data-type=\"text/javascript\">console.log(1)\n</pre></div>"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(postype(""), "");
        assert_eq!(standard(""), "");
    }

    #[test]
    fn test_front_matter_renders_nothing() {
        assert_eq!(postype("---\ntitle: X\n---\n"), "");
        assert_eq!(postype("---\ntitle: X\n---\nBody"), "<p>Body</p>\n");
    }

    #[test]
    fn test_shifted_heading_above_six() {
        let html = postype("###### Deep");
        assert_eq!(html, "<h8>Deep</h8>\n");
    }

    #[test]
    fn test_unbounded_heading_level() {
        let mut doc = parse("# Far");
        shift_headings(&mut doc, 40);
        let html = HtmlRenderer::new(StandardBackend).render(&doc);
        assert_eq!(html, "<h41>Far</h41>\n");
    }

    #[test]
    fn test_blockquote_class() {
        let html = postype("> quote");
        assert_eq!(
            html,
            "<blockquote class=\"blockquote-type2\">\n<p>quote</p>\n</blockquote>\n"
        );
    }

    #[test]
    fn test_every_blockquote_has_class() {
        let html = postype("> outer\n>\n> > inner\n\n> second");
        assert_eq!(html.matches("<blockquote").count(), 3);
        assert_eq!(
            html.matches(r#"<blockquote class="blockquote-type2">"#).count(),
            3
        );
    }

    #[test]
    fn test_link_attributes() {
        let html = postype("[site](http://x.com \"Home\") and [top](#top)");
        assert_eq!(
            html,
            "<p><a href=\"http://x.com\" title=\"Home\" rel=\"nofollow noopener noreferrer\" \
             target=\"_blank\">site</a> and <a href=\"#top\" rel=\"nofollow noopener noreferrer\" \
             target=\"_blank\">top</a></p>\n"
        );
    }

    #[test]
    fn test_standard_link_has_no_extra_attributes() {
        assert_eq!(
            standard("[a](http://x.com)"),
            "<p><a href=\"http://x.com\">a</a></p>\n"
        );
    }

    #[test]
    fn test_code_block_mime_types() {
        let html = postype("```python\nprint(1)\n```");
        assert!(html.contains(r#"<pre data-type="text/x-python">print(1)"#));

        let html = postype("```foobar\nx\n```");
        assert!(html.contains(r#"<pre data-type="text/plain">x"#));

        let html = postype("```\nno language\n```");
        assert!(html.contains(r#"<pre data-type="text/plain">no language"#));
    }

    #[test]
    fn test_code_block_followed_by_paragraph() {
        let html = postype("```sh\nls\n```\n\nafter");
        assert_eq!(
            html,
            "<div class=\"element-editor-container code\" contenteditable=\"false\">\
             <pre data-type=\"text/x-sh\">ls\n</pre></div>\n<p>after</p>\n"
        );
    }

    #[test]
    fn test_code_block_literal_is_escaped() {
        let html = postype("```html\n<b>&amp;</b>\n```");
        assert!(html.contains("&lt;b&gt;&amp;amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            postype("Use `x < y`"),
            "<p>Use <span style=\"color: rgb(112, 112, 112);\"><em>x &lt; y</em></span></p>\n"
        );
        assert_eq!(standard("Use `x`"), "<p>Use <code>x</code></p>\n");
    }

    #[test]
    fn test_standard_fenced_code() {
        assert_eq!(
            standard("```rust\nfn main() {}\n```\n"),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn test_indented_code() {
        let html = postype("    x = 1\n");
        assert!(html.starts_with("<pre><code>x = 1"));
        assert!(html.ends_with("</code></pre>\n"));
    }

    #[test]
    fn test_tight_list() {
        assert_eq!(
            standard("- a\n- b"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_loose_list() {
        assert_eq!(
            standard("- a\n\n- b"),
            "<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            standard("- a\n  - b"),
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>\n"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(standard("1. a"), "<ol>\n<li>a</li>\n</ol>\n");
        assert_eq!(
            standard("3. a\n4. b"),
            "<ol start=\"3\">\n<li>a</li>\n<li>b</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_table_with_alignment() {
        let html = standard("| a | b | c |\n|:--|:-:|--:|\n| 1 | 2 | 3 |");
        assert_eq!(
            html,
            "<table>\n<thead>\n<tr>\n\
             <th align=\"left\">a</th>\n<th align=\"center\">b</th>\n<th align=\"right\">c</th>\n\
             </tr>\n</thead>\n<tbody>\n<tr>\n\
             <td align=\"left\">1</td>\n<td align=\"center\">2</td>\n<td align=\"right\">3</td>\n\
             </tr>\n</tbody>\n</table>\n"
        );
    }

    #[test]
    fn test_table_without_body() {
        assert_eq!(
            standard("| a |\n|---|"),
            "<table>\n<thead>\n<tr>\n<th>a</th>\n</tr>\n</thead>\n</table>\n"
        );
    }

    #[test]
    fn test_table_opens_tbody_once() {
        let html = standard("| a |\n|---|\n| 1 |\n| 2 |");
        assert_eq!(html.matches("<tbody>").count(), 1);
        assert_eq!(html.matches("</tbody>").count(), 1);
        assert_eq!(html.matches("<td>").count(), 2);
    }

    #[test]
    fn test_inline_formatting_and_breaks() {
        assert_eq!(
            standard("*a* **b**\nc  \nd"),
            "<p><em>a</em> <strong>b</strong>\nc<br />\nd</p>\n"
        );
    }

    #[test]
    fn test_thematic_break() {
        assert_eq!(standard("a\n\n***"), "<p>a</p>\n<hr />\n");
    }

    #[test]
    fn test_image_alt_and_title() {
        assert_eq!(
            standard("![a *b*](x.png \"T\")"),
            "<p><img src=\"x.png\" alt=\"a b\" title=\"T\" /></p>\n"
        );
    }

    #[test]
    fn test_html_passthrough() {
        let html = standard("<div>hi</div>\n\npara <b>bold</b>");
        assert!(html.starts_with("<div>hi</div>\n<p>para "));
        assert!(html.ends_with("<b>bold</b></p>\n"));
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            standard(r#"a < b & "c""#),
            "<p>a &lt; b &amp; &quot;c&quot;</p>\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let markdown = "# T\n\n> q [l](u)\n\n| a |\n|---|\n| 1 |\n\n```py\nx\n```";
        let doc = parse(markdown);
        let renderer = HtmlRenderer::new(PostypeBackend::default());
        assert_eq!(renderer.render(&doc), renderer.render(&doc));
        assert_eq!(postype(markdown), postype(markdown));
    }

    #[test]
    fn test_deeply_nested_quotes() {
        let markdown = format!("{}deep", "> ".repeat(100));
        let html = postype(&markdown);
        assert_eq!(html.matches("<blockquote").count(), 100);
        assert!(html.contains("<p>deep</p>"));
    }
}
