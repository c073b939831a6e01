//! Markdown to html via pulldown-cmark

use pulldown_cmark::{html, Options, Parser};

use crate::services::MarkdownRenderService;

#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkRenderer;

impl CmarkRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderService for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_headings_and_tables() {
        let html = CmarkRenderer::new().render("# Scope\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>Scope</h1>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(CmarkRenderer::new().render(""), "");
    }
}
