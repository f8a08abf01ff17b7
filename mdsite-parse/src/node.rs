//! HTML element tree.
//!
//! A document renders to a tree of [`HtmlNode`]s: leaves hold a literal value
//! (optionally wrapped in a tag), parents wrap an ordered list of children.
//! Nothing here escapes text or attribute values; the tree serializes exactly
//! what it was built with.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::RenderError;

/// HTML attributes, rendered in insertion order.
pub type Attrs = IndexMap<String, String>;

/// A node in the HTML tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

/// A node without children.
///
/// With no tag the value is emitted as-is, which is how plain text runs are
/// represented inside a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeafNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

/// A tagged node wrapping an ordered list of children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParentNode {
    pub tag: Option<String>,
    pub children: Option<Vec<HtmlNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

impl HtmlNode {
    /// Serialize this node and everything below it.
    pub fn to_html(&self) -> Result<String, RenderError> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.to_html(),
            HtmlNode::Parent(parent) => parent.to_html(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.tag.as_deref(),
            HtmlNode::Parent(parent) => parent.tag.as_deref(),
        }
    }
}

impl From<LeafNode> for HtmlNode {
    fn from(leaf: LeafNode) -> Self {
        HtmlNode::Leaf(leaf)
    }
}

impl From<ParentNode> for HtmlNode {
    fn from(parent: ParentNode) -> Self {
        HtmlNode::Parent(parent)
    }
}

impl LeafNode {
    pub fn new(tag: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.map(str::to_string),
            value: Some(value.into()),
            attrs: None,
        }
    }

    /// An untagged leaf: raw text.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(None, value)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_raw_text(&self) -> bool {
        self.tag.is_none()
    }

    /// Render as `<tag attrs>value</tag>`, or the bare value when untagged.
    pub fn to_html(&self) -> Result<String, RenderError> {
        let value = self.value.as_deref().ok_or(RenderError::MissingValue)?;
        match &self.tag {
            None => Ok(value.to_string()),
            Some(tag) => Ok(format!(
                "<{tag}{}>{value}</{tag}>",
                render_attrs(self.attrs.as_ref())
            )),
        }
    }
}

impl ParentNode {
    pub fn new(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: Some(tag.into()),
            children: Some(children),
            attrs: None,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(key.into(), value.into());
        self
    }

    /// Render as `<tag attrs>` + children + `</tag>`.
    ///
    /// Untagged leaf children contribute their value directly; every other
    /// child is rendered recursively, so an untagged parent anywhere in the
    /// tree still fails with [`RenderError::MissingTag`].
    pub fn to_html(&self) -> Result<String, RenderError> {
        let tag = self.tag.as_deref().ok_or(RenderError::MissingTag)?;
        let children = self.children.as_ref().ok_or(RenderError::MissingChildren)?;

        let mut inner = String::new();
        for child in children {
            match child {
                HtmlNode::Leaf(leaf) if leaf.is_raw_text() => {
                    inner.push_str(leaf.value.as_deref().ok_or(RenderError::MissingValue)?);
                }
                other => inner.push_str(&other.to_html()?),
            }
        }

        Ok(format!(
            "<{tag}{}>{inner}</{tag}>",
            render_attrs(self.attrs.as_ref())
        ))
    }
}

/// Render attributes as ` key="value"` pairs in insertion order.
///
/// Values are written verbatim; quotes inside a value are not escaped.
pub fn render_attrs(attrs: Option<&Attrs>) -> String {
    let Some(attrs) = attrs else {
        return String::new();
    };

    attrs
        .iter()
        .map(|(key, value)| format!(" {key}=\"{value}\""))
        .collect()
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
