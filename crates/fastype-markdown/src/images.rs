//! Image reference collection.

use crate::document::{Document, NodeKind};
use crate::visit::{Walk, walk};

/// Destinations of every image in document order.
///
/// Nested images (inside links, block quotes, list items, or table cells) are
/// included. Duplicates are kept and URLs are returned as written.
#[must_use]
pub fn collect_images(doc: &Document) -> Vec<String> {
    let mut images = Vec::new();
    walk(doc, |_, node| {
        if let NodeKind::Image { destination, .. } = &node.kind {
            images.push(destination.clone());
        }
        Walk::Continue
    });
    images
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_no_images() {
        assert!(collect_images(&parse("plain [link](x)")).is_empty());
        assert!(collect_images(&parse("")).is_empty());
    }

    #[test]
    fn test_document_order_with_duplicates() {
        let doc = parse("![a](one.png)\n\n![b](two.png) ![c](one.png)");
        assert_eq!(collect_images(&doc), vec!["one.png", "two.png", "one.png"]);
    }

    #[test]
    fn test_nested_images() {
        let markdown = "\
> ![quote](q.png)

- item ![list](l.png)

[![linked](inner.png)](http://example.com)

| col |
|-----|
| ![cell](c.png) |
";
        assert_eq!(
            collect_images(&parse(markdown)),
            vec!["q.png", "l.png", "inner.png", "c.png"]
        );
    }

    #[test]
    fn test_relative_and_odd_urls_unchanged() {
        let doc = parse("![x](../img/a%20b.png) ![y](<not a url>)");
        assert_eq!(collect_images(&doc), vec!["../img/a%20b.png", "not a url"]);
    }
}
