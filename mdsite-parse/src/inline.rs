//! Inline tokenizer.
//!
//! Turns a run of raw text into typed [`TextSpan`]s and converts those into
//! leaf nodes. Each pass only re-splits spans that are still plain text, so
//! the pass order decides precedence: `**` before `*` before backticks, and
//! images before links (link syntax is a suffix of image syntax).

use std::sync::OnceLock;

use regex::Regex;

use crate::error::RenderError;
use crate::node::{HtmlNode, LeafNode};
use crate::types::{SpanKind, TextSpan};

fn image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("invalid image regex"))
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("invalid link regex"))
}

/// Tokenize `text` into spans.
///
/// Unbalanced delimiters are not repaired: `a **b` yields a bold `b`.
pub fn tokenize(text: &str) -> Vec<TextSpan> {
    let spans = vec![TextSpan::new(text, SpanKind::Text)];
    let spans = split_delimiter(spans, "**", SpanKind::Bold);
    let spans = split_delimiter(spans, "*", SpanKind::Italic);
    let spans = split_delimiter(spans, "`", SpanKind::Code);
    let spans = split_images(spans);
    split_links(spans)
}

/// Split every plain span on `delimiter`, alternating plain/`kind` starting
/// with plain. Segments may be empty when a delimiter sits at a boundary.
pub fn split_delimiter(spans: Vec<TextSpan>, delimiter: &str, kind: SpanKind) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if span.kind != SpanKind::Text {
            out.push(span);
            continue;
        }

        out.extend(span.text.split(delimiter).enumerate().map(|(i, part)| {
            let part_kind = if i % 2 == 1 { kind } else { SpanKind::Text };
            TextSpan::new(part, part_kind)
        }));
    }

    out
}

/// All `![alt](url)` occurrences, as `(alt, url)` pairs.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    extract(image_re(), text)
}

/// All `[label](url)` occurrences, as `(label, url)` pairs.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    extract(link_re(), text)
}

fn extract(re: &Regex, text: &str) -> Vec<(String, String)> {
    re.captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Split plain spans around image syntax. Empty spans of any kind are dropped.
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, image_re(), SpanKind::Image)
}

/// Split plain spans around link syntax. Empty spans of any kind are dropped.
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_pattern(spans, link_re(), SpanKind::Link)
}

fn split_pattern(spans: Vec<TextSpan>, re: &Regex, kind: SpanKind) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        if span.kind != SpanKind::Text {
            out.push(span);
            continue;
        }

        let text = span.text.as_str();
        let mut last = 0;
        for caps in re.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            if whole.start() > last {
                out.push(TextSpan::new(&text[last..whole.start()], SpanKind::Text));
            }
            out.push(TextSpan::with_url(&caps[1], kind, &caps[2]));
            last = whole.end();
        }
        if last < text.len() {
            out.push(TextSpan::new(&text[last..], SpanKind::Text));
        }
    }

    out
}

/// Convert one span into the leaf that renders it.
pub fn span_to_node(span: &TextSpan) -> Result<LeafNode, RenderError> {
    let url = || {
        span.url.as_deref().ok_or(RenderError::MissingUrl {
            kind: span.kind.as_str(),
        })
    };

    let leaf = match span.kind {
        SpanKind::Text => LeafNode::text(&span.text),
        SpanKind::Bold => LeafNode::new(Some("b"), &span.text),
        SpanKind::Italic => LeafNode::new(Some("i"), &span.text),
        SpanKind::Code => LeafNode::new(Some("code"), &span.text),
        SpanKind::Link => LeafNode::new(Some("a"), &span.text).with_attr("href", url()?),
        SpanKind::Image => LeafNode::new(Some("img"), "")
            .with_attr("src", url()?)
            .with_attr("alt", &span.text),
    };

    Ok(leaf)
}

/// Tokenize `text` and convert every span into a node.
pub fn text_to_children(text: &str) -> Result<Vec<HtmlNode>, RenderError> {
    tokenize(text)
        .iter()
        .map(|span| span_to_node(span).map(HtmlNode::from))
        .collect()
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
