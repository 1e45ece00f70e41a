//! Heading extraction from Markdown and MDX documents.

use crate::outline::FlatHeading;
use crate::parse::{ParseOptions, parse_mdast};
use crate::slug::{Slugger, split_custom_id};
use crate::TocError;
use markdown::mdast::{Heading, Node};

/// Headings of one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedHeadings {
    /// Plain text of the first level-1 heading, which titles the page.
    pub title: Option<String>,
    /// Every heading below level 1.
    pub headings: Vec<FlatHeading>,
}

/// Collects the headings of a Markdown or MDX document body.
///
/// Ids come from a trailing `{#custom-id}` when present, otherwise from a
/// github-slugger compatible slug of the heading text. Level-1 headings take
/// part in slug de-duplication but do not enter the list.
pub fn extract_headings(
    source: &str,
    options: &ParseOptions,
) -> Result<ExtractedHeadings, TocError> {
    let root = parse_mdast(source, options)?;
    let mut collector = Collector::default();
    collector.visit(&root);
    Ok(collector.out)
}

#[derive(Default)]
struct Collector {
    slugger: Slugger,
    out: ExtractedHeadings,
}

impl Collector {
    fn visit(&mut self, node: &Node) {
        if let Node::Heading(heading) = node {
            self.heading(heading);
            return;
        }
        if let Some(children) = node.children() {
            for child in children {
                self.visit(child);
            }
        }
    }

    fn heading(&mut self, heading: &Heading) {
        let custom_id = custom_id(&heading.children);
        let mut text = String::new();
        plain_text(&heading.children, &mut text);
        let text = match custom_id {
            Some(_) => split_custom_id(text.trim()).0.to_string(),
            None => text.trim().to_string(),
        };

        let id = match custom_id {
            Some(id) => {
                self.slugger.reserve(id);
                id.to_string()
            }
            None => self.slugger.slug(&text),
        };

        if heading.depth == 1 {
            if self.out.title.is_none() {
                self.out.title = Some(text);
            }
            return;
        }

        let mut value = String::new();
        inline_html(&heading.children, custom_id.is_some(), &mut value);
        self.out
            .headings
            .push(FlatHeading::new(id, heading.depth, value.trim()));
    }
}

/// A `{#id}` suffix only counts in the trailing text node, so inline code
/// such as `` `{#raw}` `` stays literal.
fn custom_id(nodes: &[Node]) -> Option<&str> {
    match nodes.last()? {
        Node::Text(text) => split_custom_id(&text.value).1,
        Node::Strong(n) => custom_id(&n.children),
        Node::Emphasis(n) => custom_id(&n.children),
        Node::Delete(n) => custom_id(&n.children),
        Node::Link(n) => custom_id(&n.children),
        _ => None,
    }
}

fn plain_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::InlineCode(code) => out.push_str(&code.value),
            Node::InlineMath(math) => out.push_str(&math.value),
            Node::Strong(n) => plain_text(&n.children, out),
            Node::Emphasis(n) => plain_text(&n.children, out),
            Node::Delete(n) => plain_text(&n.children, out),
            Node::Link(n) => plain_text(&n.children, out),
            Node::MdxJsxTextElement(n) => plain_text(&n.children, out),
            _ => {}
        }
    }
}

/// Renders heading content as the inline HTML shown in TOC entries. Link
/// wrappers are dropped since the entry itself is a link.
fn inline_html(nodes: &[Node], strip_custom_id: bool, out: &mut String) {
    let last = nodes.len().saturating_sub(1);
    for (index, node) in nodes.iter().enumerate() {
        let strip = strip_custom_id && index == last;
        match node {
            Node::Text(text) if strip => {
                let (kept, _) = split_custom_id(&text.value);
                out.push_str(&html_escape::encode_text(kept));
            }
            Node::Text(text) => out.push_str(&html_escape::encode_text(&text.value)),
            Node::InlineCode(code) => {
                out.push_str("<code>");
                out.push_str(&html_escape::encode_text(&code.value));
                out.push_str("</code>");
            }
            Node::InlineMath(math) => out.push_str(&html_escape::encode_text(&math.value)),
            Node::Html(html) => out.push_str(&html.value),
            Node::Strong(n) => wrap("strong", &n.children, strip, out),
            Node::Emphasis(n) => wrap("em", &n.children, strip, out),
            Node::Delete(n) => wrap("del", &n.children, strip, out),
            Node::Link(n) => inline_html(&n.children, strip, out),
            Node::MdxJsxTextElement(n) => inline_html(&n.children, strip, out),
            other => log::debug!("ignoring {other:?} in heading"),
        }
    }
}

fn wrap(tag: &str, children: &[Node], strip_custom_id: bool, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    inline_html(children, strip_custom_id, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(source: &str) -> ExtractedHeadings {
        extract_headings(source, &ParseOptions::markdown()).expect("extraction should succeed")
    }

    fn ids(extracted: &ExtractedHeadings) -> Vec<(&str, u8)> {
        extracted
            .headings
            .iter()
            .map(|h| (h.id.as_str(), h.level))
            .collect()
    }

    #[test]
    fn collects_headings_below_the_title() {
        let out = extract(
            "# Pausable\n\n## Code\n\n### Events and Error\n\n### Module definition\n\n## Pausable counter\n",
        );
        assert_eq!(out.title.as_deref(), Some("Pausable"));
        assert_eq!(
            ids(&out),
            vec![
                ("code", 2),
                ("events-and-error", 3),
                ("module-definition", 3),
                ("pausable-counter", 2)
            ]
        );
    }

    #[test]
    fn title_slug_takes_part_in_deduplication() {
        let out = extract("# Errors\n\n## Errors\n\n## Errors\n");
        assert_eq!(ids(&out), vec![("errors-1", 2), ("errors-2", 2)]);
    }

    #[test]
    fn values_are_inline_html() {
        let out = extract("## What's `next` for **A & B**\n\n## [Linked](https://odra.dev) <br/>\n");
        assert_eq!(
            out.headings[0].value,
            "What's <code>next</code> for <strong>A &amp; B</strong>"
        );
        assert_eq!(out.headings[0].id, "whats-next-for-a--b");
        assert_eq!(out.headings[1].value, "Linked <br/>");
    }

    #[test]
    fn custom_ids_are_used_and_stripped() {
        let out = extract("## Testing errors {#errors}\n\n## Errors\n\n## *Nested* **bold {#deep}**\n");
        assert_eq!(out.headings[0].id, "errors");
        assert_eq!(out.headings[0].value, "Testing errors");
        assert_eq!(out.headings[1].id, "errors-1");
        assert_eq!(out.headings[2].id, "deep");
        assert_eq!(out.headings[2].value, "<em>Nested</em> <strong>bold</strong>");
    }

    #[test]
    fn custom_id_inside_inline_code_is_literal() {
        let out = extract("## Syntax `{#raw}`\n");
        assert_eq!(out.headings[0].id, "syntax-raw");
        assert_eq!(out.headings[0].value, "Syntax <code>{#raw}</code>");
    }

    #[test]
    fn nested_and_setext_headings_are_found() {
        let out = extract("Intro\n=====\n\n> ## Quoted\n\n- item\n\n  ### In list\n\nSetext two\n----------\n");
        assert_eq!(out.title.as_deref(), Some("Intro"));
        assert_eq!(
            ids(&out),
            vec![("quoted", 2), ("in-list", 3), ("setext-two", 2)]
        );
    }

    #[test]
    fn headings_in_code_blocks_are_ignored() {
        let out = extract("## Real\n\n```md\n## Fake\n```\n");
        assert_eq!(ids(&out), vec![("real", 2)]);
    }

    #[test]
    fn mdx_documents_parse_jsx_around_headings() {
        let source = "import Tabs from '@theme/Tabs';\n\n# Title\n\n<Tabs>\n\n## Inside tabs\n\n</Tabs>\n\n## After\n";
        let out = extract_headings(source, &ParseOptions::mdx()).unwrap();
        assert_eq!(ids(&out), vec![("inside-tabs", 2), ("after", 2)]);
    }

    #[test]
    fn empty_document_has_no_headings() {
        assert_eq!(extract(""), ExtractedHeadings::default());
    }
}
