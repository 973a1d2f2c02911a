//! Markdown to HTML rendering for public post pages.

use ammonia::Builder as AmmoniaBuilder;
use comrak::options::Options;

/// Comrak renderer followed by Ammonia sanitisation.
pub struct MarkdownRenderer {
    options: Options<'static>,
    sanitizer: AmmoniaBuilder<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut options = Options::default();
        configure_extensions(&mut options);

        let mut sanitizer = AmmoniaBuilder::default();
        sanitizer.add_tag_attributes("code", &["class"]);
        sanitizer.add_tag_attributes("input", &["type", "checked", "disabled"]);
        sanitizer.add_tags(&["input"]);

        Self { options, sanitizer }
    }

    pub fn render(&self, markdown: &str) -> String {
        let html = comrak::markdown_to_html(markdown, &self.options);
        self.sanitizer.clean(&html).to_string()
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn configure_extensions(options: &mut Options<'static>) {
    let ext = &mut options.extension;
    ext.strikethrough = true;
    ext.table = true;
    ext.autolink = true;
    ext.tasklist = true;
    ext.footnotes = true;

    let render = &mut options.render;
    render.github_pre_lang = true;
    // Raw HTML passes through comrak and is filtered by the sanitizer instead.
    render.r#unsafe = true;
}
