#![deny(missing_docs)]
//! tocline core: table-of-contents outlines, level filtering, and active
//! heading tracking for documentation pages.

/// Theme and page TOC configuration.
pub mod config;
/// Core error types.
pub mod error;
/// Heading extraction from Markdown/MDX.
pub mod extract;
/// YAML frontmatter extraction.
pub mod frontmatter;
/// Outline building and level filtering.
pub mod outline;
/// Per-page TOC assembly.
pub mod page;
/// markdown-rs adapter.
pub mod parse;
/// HTML rendering of TOC trees.
pub mod render;
/// Slug generation utilities.
pub mod slug;
/// Active heading tracking.
pub mod tracker;

pub use config::{HeadingLevelRange, NavbarConfig, PageTocOptions, TocClasses, TocConfig};
pub use error::{ConfigError, SourceLocation, TocError};
pub use extract::{ExtractedHeadings, extract_headings};
pub use frontmatter::{Frontmatter, FrontmatterError, extract_frontmatter};
pub use outline::{FlatHeading, HeadingNode, anchor_ids, build_tree, filter_by_level_range, flatten};
pub use page::{PageToc, build_page_toc};
pub use parse::{ParseOptions, parse_mdast};
pub use render::render_toc_html;
pub use slug::{Slugger, slug_base, split_custom_id};
pub use tracker::{
    ActiveChange, ActiveHeadingTracker, EventTarget, HeadingSurface, Rect, Session, TrackerEvent,
    anchor_top_offset, measure, select_active, start_session,
};
