//! WebAssembly bindings for tocline.
//!
//! Pure functions mirror the Node bindings; [`TocHighlighter`] drives the
//! scroll highlighting of a mounted table of contents in the browser.

use serde::Serialize;
use serde_json::Value as JsonValue;
use tocline_core::{
    FlatHeading, HeadingNode, ParseOptions, TocConfig, build_page_toc, build_tree,
    filter_by_level_range, render_toc_html,
};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

mod dom;
mod highlighter;

pub use highlighter::TocHighlighter;

/// Installs the panic hook so Rust panics reach the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Version of the bindings.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Reads a `TocConfig` from a JS object; `undefined` and `null` mean defaults.
pub(crate) fn parse_config(config: JsValue) -> Result<TocConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(TocConfig::default());
    }
    let config: TocConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
    Ok(config)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
}

/// Nests `[{ id, level, value }]` in document order into a tree.
#[wasm_bindgen(js_name = buildToc)]
pub fn build_toc(headings: JsValue) -> Result<JsValue, JsError> {
    let headings: Vec<FlatHeading> = from_js(headings, "headings")?;
    to_js(&build_tree(&headings))
}

/// Keeps entries within `min..=max`, lifting children of dropped entries.
#[wasm_bindgen(js_name = filterToc)]
pub fn filter_toc(toc: JsValue, min: u8, max: u8) -> Result<JsValue, JsError> {
    let toc: Vec<HeadingNode> = from_js(toc, "toc")?;
    to_js(&filter_by_level_range(toc, min, max))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractResult {
    title: Option<String>,
    frontmatter: JsonValue,
    headings: Vec<FlatHeading>,
    toc: Vec<HeadingNode>,
    min_heading_level: u8,
    max_heading_level: u8,
    anchor_ids: Vec<String>,
    hidden: bool,
    should_render: bool,
}

/// Extracts the table of contents of a Markdown or MDX document.
///
/// The file extension of `filepath` selects MDX parsing.
#[wasm_bindgen(js_name = extractToc)]
pub fn extract_toc(source: &str, filepath: &str, config: JsValue) -> Result<JsValue, JsError> {
    let config = parse_config(config)?;
    let page = build_page_toc(source, &config, &ParseOptions::for_path(filepath))
        .map_err(|e| JsError::new(&e.in_file(filepath).to_string()))?;

    let result = ExtractResult {
        anchor_ids: page.anchor_ids(),
        should_render: page.should_render(),
        title: page.title,
        frontmatter: page.frontmatter,
        headings: page.headings,
        toc: page.tree,
        min_heading_level: page.range.min,
        max_heading_level: page.range.max,
        hidden: page.hidden,
    };
    to_js(&result)
}

/// Renders a tree as nested `<ul>` lists using the configured classes.
#[wasm_bindgen(js_name = renderToc)]
pub fn render_toc(toc: JsValue, config: JsValue) -> Result<String, JsError> {
    let config = parse_config(config)?;
    let toc: Vec<HeadingNode> = from_js(toc, "toc")?;
    Ok(render_toc_html(&toc, &config.classes))
}
