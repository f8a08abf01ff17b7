//! `mdsite-parse` — markdown to HTML for the mdsite static site generator.
//!
//! The dialect is intentionally narrow: headings, fenced code, single-line
//! quotes, flat lists and paragraphs, with bold, italic, code, link and image
//! spans inside them. Anything unrecognised renders as a paragraph.
//!
//! # Quick start
//!
//! ```
//! let html = mdsite_parse::markdown_to_html("This is **bolded** paragraph").unwrap();
//! assert_eq!(html, "<div><p>This is <b>bolded</b> paragraph</p></div>");
//! ```

pub mod blocks;
pub mod error;
pub mod inline;
pub mod node;
pub mod page;
pub mod render_html;
pub mod types;

pub use blocks::{block_to_block_type, markdown_to_blocks};
pub use error::RenderError;
pub use inline::{span_to_node, tokenize};
pub use node::{Attrs, HtmlNode, LeafNode, ParentNode, render_attrs};
pub use page::{extract_title, fill_template, render_page};
pub use render_html::{markdown_to_html, markdown_to_html_node};
pub use types::*;
