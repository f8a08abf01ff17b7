//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines, and each block is assigned a
//! [`BlockType`] by the first matching rule in [`RULES`]. The rules overlap on
//! content, so their order is the tie-break.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::BlockType;

/// Split a document into trimmed, non-empty blocks, in document order.
pub fn markdown_to_blocks(markdown: &str) -> Vec<&str> {
    markdown
        .trim()
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

// ------------------------------------------------------------------
// Classification rules
// ------------------------------------------------------------------

pub type Rule = (fn(&str) -> bool, BlockType);

/// Classification rules, highest priority first. Anything unmatched is a
/// paragraph.
pub const RULES: &[Rule] = &[
    (is_heading, BlockType::Heading),
    (is_code, BlockType::Code),
    (is_quote, BlockType::Quote),
    (is_unordered_list, BlockType::UnorderedList),
    (is_ordered_list, BlockType::OrderedList),
];

/// Classify a single block.
pub fn block_to_block_type(block: &str) -> BlockType {
    RULES
        .iter()
        .find(|(matches, _)| matches(block))
        .map(|(_, block_type)| *block_type)
        .unwrap_or(BlockType::Paragraph)
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6} \w").expect("invalid heading regex"))
}

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\A```.*```\z").expect("invalid code fence regex"))
}

fn quote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^> \w").expect("invalid quote regex"))
}

fn unordered_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[*-] \w").expect("invalid list regex"))
}

/// One to six `#`, a space, then a word character.
pub fn is_heading(block: &str) -> bool {
    heading_re().is_match(block)
}

/// Opens and closes with a ``` fence (at least six characters).
pub fn is_code(block: &str) -> bool {
    code_re().is_match(block)
}

/// Only the first line is checked.
pub fn is_quote(block: &str) -> bool {
    quote_re().is_match(block)
}

/// Only the first line is checked.
pub fn is_unordered_list(block: &str) -> bool {
    unordered_list_re().is_match(block)
}

/// Starts with `1. ` and every line `n` (1-based) starts with `n. `.
///
/// A block that starts with `1. ` but fails the per-line check matches no
/// later rule either, so it ends up a paragraph.
pub fn is_ordered_list(block: &str) -> bool {
    block.starts_with("1. ") && lines_numbered_from_one(block)
}

fn lines_numbered_from_one(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.trim().starts_with(&format!("{}. ", i + 1)))
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
