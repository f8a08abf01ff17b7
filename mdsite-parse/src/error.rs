/// Errors raised while building or serializing the HTML element tree.
///
/// Malformed markdown never produces one of these: unusual input degrades to
/// a paragraph. They only signal an element that was constructed in an
/// invalid shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Leaf node has no value")]
    MissingValue,

    #[error("Parent node has no tag")]
    MissingTag,

    #[error("Parent node has no children")]
    MissingChildren,

    #[error("Invalid span kind: {0}")]
    InvalidSpanKind(String),

    #[error("Span of kind '{kind}' has no url")]
    MissingUrl { kind: &'static str },

    #[error("Invalid code block: must start and end with ```")]
    InvalidCodeBlock,

    #[error("No `# ` heading found to use as the page title")]
    MissingTitle,
}
