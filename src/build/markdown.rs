//! Markdown rendering.

use pulldown_cmark::{Options, Parser, html};

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// pulldown-cmark options built once from the configured extension names.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownOptions(Options);

impl MarkdownOptions {
    pub fn from_extensions(extensions: &[String]) -> Result<Self, MarkdownError> {
        let mut options = Options::empty();
        for extension in extensions {
            match extension.as_str() {
                "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
                "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
                "gfm" => options.insert(Options::ENABLE_GFM),
                "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
                "smart_punctuation" => options.insert(Options::ENABLE_SMART_PUNCTUATION),
                "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
                "tables" => options.insert(Options::ENABLE_TABLES),
                "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
                other => return Err(MarkdownError::InvalidExtension(other.to_string())),
            }
        }
        Ok(Self(options))
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self(Options::empty())
    }
}

/// Render markdown to HTML.
pub fn render_markdown(markdown: &str, options: MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.0);

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let html = render_markdown("# Hello\n\nWorld", MarkdownOptions::default());

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn test_extensions_enable_tables() {
        let table = "| a | b |\n|---|---|\n| 1 | 2 |\n";

        let plain = render_markdown(table, MarkdownOptions::default());
        assert!(!plain.contains("<table>"));

        let options = MarkdownOptions::from_extensions(&["tables".to_string()]).unwrap();
        let rendered = render_markdown(table, options);
        assert!(rendered.contains("<table>"));
    }

    #[test]
    fn test_inline_html_passes_through() {
        let html = render_markdown("<em>kept</em>", MarkdownOptions::default());
        assert!(html.contains("<em>kept</em>"));
    }

    #[test]
    fn test_invalid_extension() {
        let result = MarkdownOptions::from_extensions(&["not_a_real_extension".to_string()]);
        assert!(matches!(result, Err(MarkdownError::InvalidExtension(name)) if name == "not_a_real_extension"));
    }
}
