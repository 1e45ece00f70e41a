//! Per-page TOC assembly.

use crate::config::{HeadingLevelRange, PageTocOptions, TocConfig};
use crate::extract::extract_headings;
use crate::frontmatter::extract_frontmatter;
use crate::outline::{FlatHeading, HeadingNode, anchor_ids, build_tree, filter_by_level_range};
use crate::parse::ParseOptions;
use crate::TocError;
use serde_json::Value as JsonValue;

/// Everything a page needs to render and track its table of contents.
#[derive(Debug, Clone, PartialEq)]
pub struct PageToc {
    /// Page title from the first level-1 heading.
    pub title: Option<String>,
    /// Parsed frontmatter.
    pub frontmatter: JsonValue,
    /// All headings below the title, unfiltered.
    pub headings: Vec<FlatHeading>,
    /// Level window applied to `tree`.
    pub range: HeadingLevelRange,
    /// Nested, filtered table of contents.
    pub tree: Vec<HeadingNode>,
    /// Whether the page opted out of its table of contents.
    pub hidden: bool,
}

impl PageToc {
    /// Whether the page should display a table of contents at all.
    pub fn should_render(&self) -> bool {
        !self.hidden && !self.tree.is_empty()
    }

    /// Ids the active heading tracker observes, in document order.
    pub fn anchor_ids(&self) -> Vec<String> {
        anchor_ids(&self.tree)
    }
}

/// Extracts, nests and filters the headings of one document.
///
/// Frontmatter TOC keys override the theme window; invalid keys fail the
/// page rather than silently falling back.
pub fn build_page_toc(
    source: &str,
    config: &TocConfig,
    options: &ParseOptions,
) -> Result<PageToc, TocError> {
    let frontmatter = extract_frontmatter(source)?;
    let page = PageTocOptions::from_frontmatter(&frontmatter.value)?;
    let range = config.resolve_range(&page);
    let extracted = extract_headings(&source[frontmatter.body_start..], options)?;
    let tree = filter_by_level_range(build_tree(&extracted.headings), range.min, range.max);

    log::debug!(
        "toc: {} headings, {} kept in levels {}..={}",
        extracted.headings.len(),
        count_entries(&tree),
        range.min,
        range.max
    );

    Ok(PageToc {
        title: extracted.title,
        frontmatter: frontmatter.value,
        headings: extracted.headings,
        range,
        tree,
        hidden: page.hide,
    })
}

fn count_entries(tree: &[HeadingNode]) -> usize {
    tree.iter().map(|node| 1 + count_entries(&node.children)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "---\nsidebar_position: 5\n---\n# Pausable\n\n## Code\n\n### Events and Error\n\n#### Detail\n\n### Checks and guards\n\n## Pausable counter\n";

    #[test]
    fn theme_window_applies_by_default() {
        let toc = build_page_toc(PAGE, &TocConfig::default(), &ParseOptions::markdown()).unwrap();
        assert_eq!(toc.title.as_deref(), Some("Pausable"));
        assert_eq!(toc.headings.len(), 5);
        assert_eq!(
            toc.anchor_ids(),
            vec!["code", "events-and-error", "checks-and-guards", "pausable-counter"]
        );
        assert_eq!(toc.tree[0].children.len(), 2);
        assert!(toc.should_render());
    }

    #[test]
    fn frontmatter_widens_the_window() {
        let source = PAGE.replacen("sidebar_position: 5", "toc_max_heading_level: 4", 1);
        let toc = build_page_toc(&source, &TocConfig::default(), &ParseOptions::markdown()).unwrap();
        assert_eq!(toc.range, HeadingLevelRange::new(2, 4));
        assert_eq!(toc.anchor_ids().len(), 5);
        assert_eq!(toc.tree[0].children[0].children[0].id, "detail");
    }

    #[test]
    fn hidden_pages_keep_their_tree() {
        let source = PAGE.replacen("sidebar_position: 5", "hide_table_of_contents: true", 1);
        let toc = build_page_toc(&source, &TocConfig::default(), &ParseOptions::markdown()).unwrap();
        assert!(toc.hidden);
        assert!(!toc.should_render());
        assert!(!toc.tree.is_empty());
    }

    #[test]
    fn page_without_subheadings_renders_nothing() {
        let toc = build_page_toc("# Only a title\n\nText.", &TocConfig::default(), &ParseOptions::markdown())
            .unwrap();
        assert!(toc.tree.is_empty());
        assert!(!toc.should_render());
    }

    #[test]
    fn invalid_frontmatter_fails_the_page() {
        let err = build_page_toc(
            "---\ntoc_min_heading_level: 1\n---\n## A\n",
            &TocConfig::default(),
            &ParseOptions::markdown(),
        )
        .unwrap_err();
        assert!(matches!(err, TocError::Config(_)));

        let err = build_page_toc("---\ntitle: x\n", &TocConfig::default(), &ParseOptions::markdown())
            .unwrap_err();
        assert!(matches!(err, TocError::Frontmatter(_)));
    }
}
