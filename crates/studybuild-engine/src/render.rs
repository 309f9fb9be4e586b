//! Markdown to HTML rendering for model output.
//!
//! Model text is untrusted. Raw HTML in the markdown is escaped and shown as
//! text, and links or images with script-capable URL schemes point to `#`.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use regex::Regex;
use std::sync::OnceLock;

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn unsafe_scheme() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(javascript|vbscript|data):").expect("static regex is valid")
    })
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if unsafe_scheme().is_match(&url) {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

/// Render markdown to an HTML fragment. Empty input gives an empty string.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options()).map(sanitize);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render markdown to a standalone HTML page.
pub fn render_document(title: &str, markdown: &str) -> String {
    let mut escaped_title = String::new();
    for ch in title.chars() {
        match ch {
            '<' => escaped_title.push_str("&lt;"),
            '>' => escaped_title.push_str("&gt;"),
            '&' => escaped_title.push_str("&amp;"),
            '"' => escaped_title.push_str("&quot;"),
            c => escaped_title.push(c),
        }
    }
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{escaped_title}</title>\n</head>\n<body>\n<article>\n{}</article>\n\
         </body>\n</html>\n",
        render_html(markdown)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_render_paragraph() {
        assert_snapshot!(render_html("Plants eat sunlight."), @"<p>Plants eat sunlight.</p>");
    }

    #[test]
    fn test_render_heading_and_emphasis() {
        assert_snapshot!(render_html("# Key Takeaway\n\nLeaves use **light**."), @r###"
        <h1>Key Takeaway</h1>
        <p>Leaves use <strong>light</strong>.</p>
        "###);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_html(""), "");
    }

    #[test]
    fn test_render_is_idempotent() {
        let md = "## Quiz\n\n1. What?\n   - [ ] A\n   - [x] B\n\n```rust\nfn main() {}\n```\n";
        assert_eq!(render_html(md), render_html(md));
    }

    #[test]
    fn test_code_block_is_escaped() {
        let html = render_html("```\nif a < b && c > d {}\n```");
        assert!(html.contains("<pre><code>"));
        assert!(html.contains("a &lt; b &amp;&amp; c &gt; d"));
    }

    #[test]
    fn test_raw_html_block_is_escaped() {
        let html = render_html("<script>alert(1)</script>\n");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_inline_html_is_escaped() {
        let html = render_html("Click <img src=x onerror=alert(1)> here");
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn test_script_links_are_neutralized() {
        let html = render_html(
            "[a](javascript:alert(1)) [b](JavaScript:void(0)) ![c](data:image/svg+xml,x)",
        );
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(!html.contains("data:"));
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("src=\"#\""));
    }

    #[test]
    fn test_ordinary_links_are_kept() {
        let html = render_html("[docs](https://example.com/a?b=1)");
        assert!(html.contains("href=\"https://example.com/a?b=1\""));
    }

    #[test]
    fn test_tables_are_rendered() {
        let html = render_html("| Q | A |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn test_render_document_wraps_fragment() {
        let page = render_document("Notes <draft>", "*hi*");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Notes &lt;draft&gt;</title>"));
        assert!(page.contains("<em>hi</em>"));
    }
}
