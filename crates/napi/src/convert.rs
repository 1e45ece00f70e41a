//! Conversions between core types and their NAPI counterparts.

use crate::types::{FileInputType, PageTocResult, TocHeading, TocItem, TocOptions};
use napi::{Error, Status};
use tocline_core::config::{MAX_TOC_LEVEL, MIN_TOC_LEVEL};
use tocline_core::{ConfigError, FlatHeading, HeadingNode, PageToc, ParseOptions, TocConfig, TocError};

/// Narrows a JS level to `u8`. Levels are not validated here, so anything
/// past 255 saturates and still sorts as the deepest level.
pub fn level_from_js(level: u32) -> u8 {
    u8::try_from(level).unwrap_or(u8::MAX)
}

pub fn to_flat(heading: TocHeading) -> FlatHeading {
    FlatHeading::new(heading.id, level_from_js(heading.level), heading.value)
}

pub fn from_flat(heading: FlatHeading) -> TocHeading {
    TocHeading {
        id: heading.id,
        level: heading.level.into(),
        value: heading.value,
    }
}

pub fn to_node(item: TocItem) -> HeadingNode {
    HeadingNode {
        id: item.id,
        level: level_from_js(item.level),
        value: item.value,
        children: item.children.into_iter().map(to_node).collect(),
    }
}

pub fn from_node(node: HeadingNode) -> TocItem {
    TocItem {
        id: node.id,
        level: node.level.into(),
        value: node.value,
        children: node.children.into_iter().map(from_node).collect(),
    }
}

/// Builds a validated core config from JS options, defaults filling the gaps.
pub fn to_toc_config(options: Option<&TocOptions>) -> Result<TocConfig, ConfigError> {
    let mut config = TocConfig::default();
    let Some(options) = options else {
        return Ok(config);
    };

    if let Some(level) = options.min_heading_level {
        config.min_heading_level = checked_level("minHeadingLevel", level)?;
    }
    if let Some(level) = options.max_heading_level {
        config.max_heading_level = checked_level("maxHeadingLevel", level)?;
    }
    if let Some(class) = &options.list_class {
        config.classes.list = class.clone();
    }
    if let Some(class) = &options.link_class {
        config.classes.link = class.clone();
    }
    config.validate()?;
    Ok(config)
}

fn checked_level(field: &'static str, level: u32) -> Result<u8, ConfigError> {
    u8::try_from(level).map_err(|_| ConfigError::LevelOutOfRange {
        field,
        value: level.into(),
        min: MIN_TOC_LEVEL,
        max: MAX_TOC_LEVEL,
    })
}

/// Explicit file type wins; otherwise the path extension decides.
pub fn parse_options(options: Option<&TocOptions>, filepath: Option<&str>) -> ParseOptions {
    match options.and_then(|o| o.file_type) {
        Some(FileInputType::Markdown) => ParseOptions::markdown(),
        Some(FileInputType::Mdx) => ParseOptions::mdx(),
        None => filepath.map(ParseOptions::for_path).unwrap_or_default(),
    }
}

pub fn from_page_toc(page: PageToc) -> PageTocResult {
    let anchor_ids = page.anchor_ids();
    let should_render = page.should_render();
    PageTocResult {
        title: page.title,
        frontmatter: page.frontmatter,
        headings: page.headings.into_iter().map(from_flat).collect(),
        toc: page.tree.into_iter().map(from_node).collect(),
        min_heading_level: page.range.min.into(),
        max_heading_level: page.range.max.into(),
        anchor_ids,
        hidden: page.hidden,
        should_render,
    }
}

/// Maps core errors to NAPI errors; bad input is `InvalidArg`.
pub fn convert_error<E: Into<TocError>>(err: E) -> Error {
    match err.into() {
        TocError::Markdown { message, location } => Error::from_reason(format!(
            "Markdown parser error at {}: {}",
            location, message
        )),
        TocError::Frontmatter(e) => {
            Error::new(Status::InvalidArg, format!("Frontmatter error: {}", e))
        }
        TocError::Config(e) => Error::new(Status::InvalidArg, format!("Invalid TOC options: {}", e)),
    }
}
