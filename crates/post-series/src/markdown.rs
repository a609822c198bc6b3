use pulldown_cmark::{self as md, html};

/// Renders the given Markdown text to an HTML string.
pub fn markdown_to_html(text: &str) -> String {
    let mut options = md::Options::empty();
    options.insert(md::Options::ENABLE_TABLES);
    options.insert(md::Options::ENABLE_FOOTNOTES);
    options.insert(md::Options::ENABLE_STRIKETHROUGH);
    options.insert(md::Options::ENABLE_TASKLISTS);
    options.insert(md::Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = md::Parser::new_ext(text, options);

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, parser);

    output
}
