//! Block renderer and document assembler.
//!
//! Each classified block becomes one parent node; the whole document is
//! wrapped in a single `<div>`.

use tracing::{debug, trace};

use crate::blocks::{block_to_block_type, markdown_to_blocks};
use crate::error::RenderError;
use crate::inline::text_to_children;
use crate::node::{HtmlNode, ParentNode};
use crate::types::BlockType;

/// Characters trimmed from both ends of the plain-text runs of a heading.
///
/// This is a character set, not a prefix pattern: `# Chapter 1` trims to
/// `Chapter` because `1` and the space before it are in the set.
const HEADING_MARKER_CHARS: &str = r"^(#{1,6} \w+)";

/// Characters trimmed from both ends of the plain-text runs of a quote.
const QUOTE_MARKER_CHARS: &str = r"^(>{1} \w+)";

/// Render a markdown document to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String, RenderError> {
    markdown_to_html_node(markdown)?.to_html()
}

/// Render a markdown document to a `<div>` wrapping one node per block.
pub fn markdown_to_html_node(markdown: &str) -> Result<ParentNode, RenderError> {
    // Normalise CRLF → LF so blank-line splitting sees `\n\n`.
    let normalised = markdown.replace("\r\n", "\n");

    let mut children = Vec::new();
    for block in markdown_to_blocks(&normalised) {
        let block_type = block_to_block_type(block);
        trace!(%block_type, len = block.len(), "classified block");
        children.push(HtmlNode::from(block_to_html_node(block, block_type)?));
    }

    debug!(blocks = children.len(), "rendered markdown document");
    Ok(ParentNode::new("div", children))
}

/// Render one block that has already been classified as `block_type`.
pub fn block_to_html_node(block: &str, block_type: BlockType) -> Result<ParentNode, RenderError> {
    match block_type {
        BlockType::Paragraph => block_to_paragraph(block),
        BlockType::Heading => block_to_heading(block),
        BlockType::Code => block_to_code(block),
        BlockType::Quote => block_to_blockquote(block),
        BlockType::UnorderedList => block_to_list(block, "ul"),
        BlockType::OrderedList => block_to_list(block, "ol"),
    }
}

pub fn block_to_paragraph(block: &str) -> Result<ParentNode, RenderError> {
    Ok(ParentNode::new("p", text_to_children(block)?))
}

/// The `#` marker is tokenized with the rest of the line, then the plain runs
/// are trimmed with [`HEADING_MARKER_CHARS`].
pub fn block_to_heading(block: &str) -> Result<ParentNode, RenderError> {
    let level = heading_level(block);
    let mut children = text_to_children(block)?;
    trim_raw_text(&mut children, HEADING_MARKER_CHARS);
    Ok(ParentNode::new(format!("h{level}"), children))
}

/// Number of leading `#`, clamped to 1..=6.
pub fn heading_level(block: &str) -> usize {
    block.chars().take_while(|c| *c == '#').count().clamp(1, 6)
}

pub fn block_to_blockquote(block: &str) -> Result<ParentNode, RenderError> {
    let mut children = text_to_children(block)?;
    trim_raw_text(&mut children, QUOTE_MARKER_CHARS);
    Ok(ParentNode::new("blockquote", children))
}

/// Every line becomes an `<li>` after dropping its first three characters.
///
/// The fixed offset assumes a one-character marker plus a space (`* `, `- `,
/// `1. `); `10. item` loses only `10.` and keeps the space.
pub fn block_to_list(block: &str, tag: &str) -> Result<ParentNode, RenderError> {
    let items = block
        .split('\n')
        .map(|line| {
            let children = text_to_children(skip_chars(line, 3))?;
            Ok(HtmlNode::from(ParentNode::new("li", children)))
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    Ok(ParentNode::new(tag, items))
}

/// `<pre><code>` with the first four and last three characters removed.
///
/// The four leading characters are the fence plus the character after it, so
/// a language tag loses only its first letter.
pub fn block_to_code(block: &str) -> Result<ParentNode, RenderError> {
    if !block.starts_with("```") || !block.ends_with("```") {
        return Err(RenderError::InvalidCodeBlock);
    }

    let start = block.len() - skip_chars(block, 4).len();
    let end = block.len() - 3;
    let inner = block.get(start..end).unwrap_or("");

    let code = ParentNode::new("code", text_to_children(inner)?);
    Ok(ParentNode::new("pre", vec![code.into()]))
}

/// `s` without its first `n` characters (empty if shorter).
fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[i..],
        None => "",
    }
}

/// Trim every character in `chars` from both ends of each untagged leaf.
fn trim_raw_text(children: &mut [HtmlNode], chars: &str) {
    for child in children {
        let HtmlNode::Leaf(leaf) = child else {
            continue;
        };
        if !leaf.is_raw_text() {
            continue;
        }
        if let Some(value) = leaf.value.as_mut() {
            *value = value.trim_matches(|c: char| chars.contains(c)).to_string();
        }
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn html(block: &str) -> String {
        block_to_html_node(block, block_to_block_type(block))
            .unwrap()
            .to_html()
            .unwrap()
    }

    #[test]
    fn paragraph_with_bold() {
        assert_eq!(
            html("This is **bolded** paragraph"),
            "<p>This is <b>bolded</b> paragraph</p>"
        );
    }

    #[test]
    fn paragraph_keeps_line_breaks() {
        assert_eq!(
            html("first line\nsecond *line*"),
            "<p>first line\nsecond <i>line</i></p>"
        );
    }

    #[test]
    fn heading_strips_marker() {
        assert_eq!(html("# This is a heading"), "<h1>This is a heading</h1>");
        assert_eq!(html("### Third level"), "<h3>Third level</h3>");
    }

    #[test]
    fn heading_trim_is_a_char_set() {
        assert_eq!(html("## Chapter 1"), "<h2>Chapter</h2>");
    }

    #[test]
    fn heading_with_inline_spans() {
        assert_eq!(html("## Hello **world**"), "<h2>Hello<b>world</b></h2>");
    }

    #[test]
    fn heading_level_counts_leading_hashes_only() {
        assert_eq!(heading_level("## a # b"), 2);
        assert_eq!(heading_level("###### x"), 6);
    }

    #[test]
    fn quote_strips_marker() {
        assert_eq!(
            html("> Here is a quote"),
            "<blockquote>Here is a quote</blockquote>"
        );
    }

    #[test]
    fn multi_line_quote_keeps_inner_markers() {
        assert_eq!(
            html("> first\n> second"),
            "<blockquote>first\n> second</blockquote>"
        );
    }

    #[test]
    fn unordered_list_strips_three_chars() {
        assert_eq!(
            html("* This is a list\n- with *items*"),
            "<ul><li>his is a list</li><li>ith <i>items</i></li></ul>"
        );
    }

    #[test]
    fn ordered_list() {
        assert_eq!(
            html("1. first\n2. second\n3. `third`"),
            "<ol><li>first</li><li>second</li><li><code>third</code></li></ol>"
        );
    }

    #[test]
    fn ordered_list_two_digit_marker_keeps_space() {
        let block = (1..=10)
            .map(|n| format!("{n}. item"))
            .collect::<Vec<_>>()
            .join("\n");
        let rendered = html(&block);
        assert!(rendered.ends_with("<li> item</li></ol>"), "{rendered}");
    }

    #[test]
    fn code_block_drops_fence_and_next_char() {
        assert_eq!(
            html("```php\ncodeblock\n```"),
            "<pre><code>hp\ncodeblock\n</code></pre>"
        );
        assert_eq!(
            html("```\nlet x = 1;\n```"),
            "<pre><code>let x = 1;\n</code></pre>"
        );
    }

    #[test]
    fn code_block_is_tokenized() {
        assert_eq!(
            html("```\n**loud**\n```"),
            "<pre><code><b>loud</b>\n</code></pre>"
        );
    }

    #[test]
    fn empty_code_block() {
        assert_eq!(html("``````"), "<pre><code></code></pre>");
    }

    #[test]
    fn code_render_rejects_unfenced_block() {
        assert_eq!(
            block_to_code("not code").unwrap_err(),
            RenderError::InvalidCodeBlock
        );
        assert_eq!(
            block_to_html_node("```\nopen", BlockType::Code).unwrap_err(),
            RenderError::InvalidCodeBlock
        );
    }

    #[test]
    fn list_item_shorter_than_marker() {
        assert_eq!(
            block_to_list("* a\n*", "ul").unwrap().to_html().unwrap(),
            "<ul><li></li><li></li></ul>"
        );
    }

    #[test]
    fn document_wraps_blocks_in_div() {
        let out = markdown_to_html("# Title\n\nSome *text*\n\n1. a\n2. b").unwrap();
        assert_eq!(
            out,
            "<div><h1>Title</h1><p>Some <i>text</i></p><ol><li>a</li><li>b</li></ol></div>"
        );
    }

    #[test]
    fn crlf_documents_split_into_blocks() {
        let out = markdown_to_html("# Title\r\n\r\nBody").unwrap();
        assert_eq!(out, "<div><h1>Title</h1><p>Body</p></div>");
    }

    #[test]
    fn empty_document() {
        assert_eq!(markdown_to_html("").unwrap(), "<div></div>");
        assert_eq!(markdown_to_html("\n\n\n").unwrap(), "<div></div>");
    }
}
