#![deny(missing_docs)]
//! Node.js bindings that surface tocline's Rust implementation.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use tocline_core::{build_page_toc, build_tree, filter_by_level_range, render_toc_html};

/// Batch extraction types and functions.
pub mod batch;
/// Core/NAPI type conversions.
mod convert;
/// NAPI-exposed data structures.
pub mod types;
pub use batch::*;
pub use types::*;

use convert::{
    convert_error, from_node, from_page_toc, level_from_js, parse_options, to_flat, to_node,
    to_toc_config,
};

/// Nests a flat, document-ordered heading list into a tree.
#[napi(js_name = "buildToc")]
pub fn build_toc(headings: Vec<TocHeading>) -> Vec<TocItem> {
    let flat: Vec<_> = headings.into_iter().map(to_flat).collect();
    build_tree(&flat).into_iter().map(from_node).collect()
}

/// Keeps entries whose level lies in `minHeadingLevel..=maxHeadingLevel`,
/// lifting the children of dropped entries into their place.
#[napi(js_name = "filterToc")]
pub fn filter_toc(toc: Vec<TocItem>, min_heading_level: u32, max_heading_level: u32) -> Vec<TocItem> {
    let tree = toc.into_iter().map(to_node).collect();
    filter_by_level_range(tree, level_from_js(min_heading_level), level_from_js(max_heading_level))
        .into_iter()
        .map(from_node)
        .collect()
}

/// Extracts the table of contents of one Markdown or MDX document.
///
/// `filepath` picks Markdown or MDX parsing by extension unless
/// `options.fileType` is set. Frontmatter TOC keys override the options.
#[napi(js_name = "extractToc")]
pub fn extract_toc(
    source: String,
    filepath: Option<String>,
    options: Option<TocOptions>,
) -> Result<PageTocResult> {
    let config = to_toc_config(options.as_ref()).map_err(convert_error)?;
    let parse = parse_options(options.as_ref(), filepath.as_deref());
    let page = build_page_toc(&source, &config, &parse).map_err(|err| match &filepath {
        Some(path) => convert_error(err.in_file(path.as_str())),
        None => convert_error(err),
    })?;
    Ok(from_page_toc(page))
}

/// Renders entries as nested `<ul>` lists of anchor links.
#[napi(js_name = "renderTocHtml")]
pub fn render_toc(toc: Vec<TocItem>, options: Option<TocOptions>) -> Result<String> {
    let config = to_toc_config(options.as_ref()).map_err(convert_error)?;
    let tree: Vec<_> = toc.into_iter().map(to_node).collect();
    Ok(render_toc_html(&tree, &config.classes))
}
