//! Markdown rendering for post bodies, plus the plain-text excerpt used as
//! a fallback description.

use pulldown_cmark::{html, Event, Options, Parser};

/// Converts a markdown post body to HTML. Footnotes, smart punctuation,
/// strikethrough, tables, and tasklists are enabled.
pub fn to_html(markdown: &str) -> String {
    let mut body = String::new();
    html::push_html(&mut body, Parser::new_ext(markdown, options()));
    body
}

/// Extracts a plain-text excerpt from a markdown body: the text content of
/// the event stream, whitespace-normalized, truncated to `limit`
/// characters with a trailing `…` when anything was cut off.
pub fn excerpt(markdown: &str, limit: usize) -> String {
    let mut text = String::new();
    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(_) => text.push(' '),
            _ => {}
        }
    }

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= limit {
        return text;
    }
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.truncate(truncated.trim_end().len());
    truncated.push('…');
    truncated
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_to_html() {
        assert_eq!(
            "<h1>Hello</h1>\n<p><em>world</em></p>\n",
            to_html("# Hello\n\n*world*"),
        );
    }

    #[test]
    fn test_excerpt_strips_markup_and_normalizes_whitespace() {
        assert_eq!(
            "Hello world and code too",
            excerpt("# Hello\n\n*world*  and `code`\ntoo", 180),
        );
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        assert_eq!("Hello…", excerpt("Hello world", 6));
        // No ellipsis when the text already fits.
        assert_eq!("Hello world", excerpt("Hello world", 11));
    }
}
