//! WASM bindings for `mdsite-parse`.
//!
//! Exposes the markdown renderer to JavaScript via wasm-bindgen.
//! Call `render_html()` with a markdown string to get the HTML fragment, or
//! `render_page()` to substitute it into a template.

use mdsite_parse::TextSpan;
use wasm_bindgen::prelude::*;

fn js_error(err: mdsite_parse::RenderError) -> JsError {
    JsError::new(&err.to_string())
}

/// Render markdown to an HTML fragment wrapped in a single `<div>`.
#[wasm_bindgen]
pub fn render_html(input: &str) -> Result<String, JsError> {
    mdsite_parse::markdown_to_html(input).map_err(js_error)
}

/// Render markdown into `template`, replacing `{{ Title }}` and
/// `{{ Content }}`. Fails when the document has no `# ` title line.
#[wasm_bindgen]
pub fn render_page(input: &str, template: &str) -> Result<String, JsError> {
    mdsite_parse::render_page(input, template).map_err(js_error)
}

/// Tokenize inline text and return the spans as a JSON array of
/// `{ text, kind, url? }` objects.
#[wasm_bindgen]
pub fn tokenize(text: &str) -> String {
    serde_json::to_string(&mdsite_parse::tokenize(text)).unwrap_or_else(|_| "[]".to_string())
}

/// Return the block type of every block in the document as a JSON array of
/// names (`"heading"`, `"unordered_list"`, ...).
#[wasm_bindgen]
pub fn block_types(input: &str) -> String {
    let types: Vec<_> = mdsite_parse::markdown_to_blocks(input)
        .into_iter()
        .map(mdsite_parse::block_to_block_type)
        .collect();
    serde_json::to_string(&types).unwrap_or_else(|_| "[]".to_string())
}

/// Render a single span given by kind name (`text`, `bold`, `italic`,
/// `code`, `link`, `image`).
#[wasm_bindgen]
pub fn render_span(text: &str, kind: &str, url: Option<String>) -> Result<String, JsError> {
    let span = TextSpan::from_parts(text, kind, url.as_deref()).map_err(js_error)?;
    mdsite_parse::span_to_node(&span)
        .and_then(|leaf| leaf.to_html())
        .map_err(js_error)
}
