//! Description Rendering
//!
//! Project and task descriptions are Markdown written by users. They are
//! rendered with pulldown-cmark; code blocks are highlighted with syntect.
//! Raw HTML is shown as text and links with script-capable schemes are
//! dropped, since the output goes straight into `inner_html`.

use std::sync::OnceLock;

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Option<Theme>> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    THEME
        .get_or_init(|| ThemeSet::load_defaults().themes.remove("InspiredGitHub"))
        .as_ref()
}

fn options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a description to HTML safe for `inner_html`
pub fn render_description(text: &str) -> String {
    let events = sanitize(Parser::new_ext(text, options()));
    let mut html = String::new();
    push_html(&mut html, events.into_iter());
    html
}

/// Plain text of a description, cut at `max` characters with an ellipsis
pub fn excerpt(text: &str, max: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => plain.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph)
            | Event::End(TagEnd::Heading(_))
            | Event::End(TagEnd::Item) => plain.push(' '),
            _ => {}
        }
    }
    let plain = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if plain.chars().count() <= max {
        return plain;
    }
    let cut: String = plain.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    match lower.split_once(':') {
        // Relative or fragment links carry no scheme
        None => true,
        Some((scheme, _)) if scheme.contains('/') || scheme.contains('#') || scheme.contains('?') => true,
        Some((scheme, _)) => matches!(scheme, "http" | "https" | "mailto"),
    }
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    /// Inside a link or image whose target was dropped
    Unwrapped { depth: usize },
}

fn sanitize<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }
                Event::Start(Tag::Link { ref dest_url, .. }) | Event::Start(Tag::Image { ref dest_url, .. })
                    if !is_safe_url(dest_url) =>
                {
                    state = State::Unwrapped { depth: 0 };
                }
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },

            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },

            // Keep the link text, lose the link
            State::Unwrapped { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) if *depth == 0 => state = State::Normal,
                Event::End(_) => *depth -= 1,
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                other => events.push(other),
            },
        }
    }

    events
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    theme()
        .and_then(|theme| highlighted_html_for_string(code, ss, syntax, theme).ok())
        .unwrap_or_else(|| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_description("**bold** and ~~gone~~");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_description("hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_are_unwrapped() {
        let html = render_description("[click](javascript:alert(1)) and [ok](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("click"));
        assert!(html.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_safe_url_rules() {
        assert!(is_safe_url("/projects/1"));
        assert!(is_safe_url("#top"));
        assert!(is_safe_url("mailto:a@b.c"));
        assert!(!is_safe_url(" JavaScript:void(0)"));
        assert!(!is_safe_url("data:text/html,hi"));
    }

    #[test]
    fn test_code_block_is_highlighted() {
        let html = render_description("```rust\nfn main() {}\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("# Title\n\nSome *body* text", 100), "Title Some body text");
        assert_eq!(excerpt("abcdefghij", 4), "abcd…");
    }
}
