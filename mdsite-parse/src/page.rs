//! Full-page rendering: title extraction and template substitution.

use crate::blocks::is_heading;
use crate::error::RenderError;
use crate::render_html::markdown_to_html;

/// Placeholder replaced with the page title.
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
/// Placeholder replaced with the rendered document.
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Text of the first h1 line (`# ` followed by a word character).
///
/// Deeper headings (`## ...`) are never used as the title.
pub fn extract_title(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim_start)
        .find(|line| is_heading(line) && !line.starts_with("##"))
        .map(|line| line.trim_start_matches(['#', ' ']).trim_end().to_string())
}

/// Substitute every title and content placeholder in `template`.
pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Render `markdown` into `template`.
pub fn render_page(markdown: &str, template: &str) -> Result<String, RenderError> {
    let title = extract_title(markdown).ok_or(RenderError::MissingTitle)?;
    let content = markdown_to_html(markdown)?;
    Ok(fill_template(template, &title, &content))
}
