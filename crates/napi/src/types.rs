//! NAPI-exposed data structures.

use napi_derive::napi;
use serde_json::Value as JsonValue;

/// One heading in document order, before nesting.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocHeading {
    /// Anchor id without the leading `#`.
    pub id: String,
    /// Heading level; values outside 1-6 are accepted.
    pub level: u32,
    /// Inline HTML shown in the entry.
    pub value: String,
}

/// Nested table of contents entry.
#[napi(object)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    /// Anchor id without the leading `#`.
    pub id: String,
    /// Heading level.
    pub level: u32,
    /// Inline HTML shown in the entry.
    pub value: String,
    /// Deeper headings that follow this one, in document order.
    pub children: Vec<TocItem>,
}

/// File categories the extractor understands.
#[napi(string_enum)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileInputType {
    /// Standard Markdown (.md).
    Markdown,
    /// MDX documents (.mdx) with JSX and ESM.
    Mdx,
}

/// Theme-level settings shared by extraction and rendering.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct TocOptions {
    /// Shallowest level listed (default 2).
    pub min_heading_level: Option<u32>,
    /// Deepest level listed (default 3).
    pub max_heading_level: Option<u32>,
    /// Class of the outermost `<ul>`.
    pub list_class: Option<String>,
    /// Class of every entry link.
    pub link_class: Option<String>,
    /// Overrides extension-based detection of the document syntax.
    pub file_type: Option<FileInputType>,
}

/// Table of contents of one document.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct PageTocResult {
    /// Text of the first level-1 heading.
    pub title: Option<String>,
    /// Frontmatter as JSON (an empty object when absent).
    pub frontmatter: JsonValue,
    /// Every heading below the title, unfiltered.
    pub headings: Vec<TocHeading>,
    /// Nested entries within the resolved level window.
    pub toc: Vec<TocItem>,
    /// Shallowest level kept after frontmatter overrides.
    pub min_heading_level: u32,
    /// Deepest level kept after frontmatter overrides.
    pub max_heading_level: u32,
    /// Ids to observe for scroll highlighting, in document order.
    pub anchor_ids: Vec<String>,
    /// `hide_table_of_contents` from the frontmatter.
    pub hidden: bool,
    /// Whether a table of contents should be displayed.
    pub should_render: bool,
}
