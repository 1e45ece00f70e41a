//! HTML rendering of a heading tree.

use crate::config::TocClasses;
use crate::outline::HeadingNode;

/// Renders a tree as nested lists of anchor links.
///
/// Only the outermost `<ul>` carries the list class. Entry values are
/// inserted verbatim since they are already inline HTML; ids are escaped for
/// the `href` attribute. An empty tree renders as an empty string.
pub fn render_toc_html(tree: &[HeadingNode], classes: &TocClasses) -> String {
    let mut html = String::new();
    render_list(tree, Some(&classes.list), &classes.link, &mut html);
    html
}

fn render_list(nodes: &[HeadingNode], class: Option<&str>, link_class: &str, html: &mut String) {
    if nodes.is_empty() {
        return;
    }

    match class.filter(|c| !c.is_empty()) {
        Some(class) => {
            html.push_str("<ul class=\"");
            html.push_str(&html_escape::encode_double_quoted_attribute(class));
            html.push_str("\">");
        }
        None => html.push_str("<ul>"),
    }

    for node in nodes {
        html.push_str("<li><a href=\"#");
        html.push_str(&html_escape::encode_double_quoted_attribute(&node.id));
        html.push('"');
        if !link_class.is_empty() {
            html.push_str(" class=\"");
            html.push_str(&html_escape::encode_double_quoted_attribute(link_class));
            html.push('"');
        }
        html.push('>');
        html.push_str(&node.value);
        html.push_str("</a>");
        render_list(&node.children, None, link_class, html);
        html.push_str("</li>");
    }
    html.push_str("</ul>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{FlatHeading, build_tree};

    fn sample() -> Vec<HeadingNode> {
        build_tree(&[
            FlatHeading::new("code", 2, "Code"),
            FlatHeading::new("events-and-error", 3, "Events &amp; <code>Error</code>"),
            FlatHeading::new("pausable-counter", 2, "Pausable counter"),
        ])
    }

    #[test]
    fn renders_nested_lists() {
        let html = render_toc_html(&sample(), &TocClasses::default());
        insta::assert_snapshot!(html, @r##"<ul class="table-of-contents table-of-contents__left-border"><li><a href="#code" class="table-of-contents__link">Code</a><ul><li><a href="#events-and-error" class="table-of-contents__link">Events &amp; <code>Error</code></a></li></ul></li><li><a href="#pausable-counter" class="table-of-contents__link">Pausable counter</a></li></ul>"##);
    }

    #[test]
    fn empty_classes_are_omitted() {
        let classes = TocClasses {
            list: String::new(),
            link: String::new(),
            link_active: String::new(),
        };
        let tree = build_tree(&[FlatHeading::new("a\"b", 2, "A")]);
        insta::assert_snapshot!(render_toc_html(&tree, &classes), @r##"<ul><li><a href="#a&quot;b">A</a></li></ul>"##);
    }

    #[test]
    fn empty_tree_renders_nothing() {
        assert_eq!(render_toc_html(&[], &TocClasses::default()), "");
    }
}
