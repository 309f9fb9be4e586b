//! Markdown rendering using pulldown-cmark.
//!
//! Model output is shown in the terminal as styled [`Line`]s. Raw HTML is
//! never interpreted; it appears as muted literal text.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::styles::MarkdownStyles;

/// Widest a horizontal rule gets.
const MAX_RULE_WIDTH: usize = 60;

/// Render markdown text to styled ratatui Lines.
///
/// `width` sizes horizontal rules; wrapping is left to the caller.
pub fn render_markdown(input: &str, width: usize, styles: &MarkdownStyles) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = MarkdownRenderer::new(styles.clone(), width);
    renderer.run(Parser::new_ext(input, options));
    renderer.finish()
}

/// Cells collected while inside a table.
#[derive(Default)]
struct TableBuffer {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    has_header: bool,
}

impl TableBuffer {
    fn end_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        self.rows.push(row);
    }
}

struct MarkdownRenderer {
    lines: Vec<Line<'static>>,
    styles: MarkdownStyles,
    width: usize,
    /// Inline styles, innermost last.
    style_stack: Vec<Style>,
    current: Vec<Span<'static>>,
    /// One entry per open list; `Some(n)` is the next number of an ordered list.
    lists: Vec<Option<u64>>,
    pending_marker: Option<String>,
    in_code_block: bool,
    quote_depth: usize,
    link_targets: Vec<String>,
    table: Option<TableBuffer>,
}

impl MarkdownRenderer {
    fn new(styles: MarkdownStyles, width: usize) -> Self {
        Self {
            lines: Vec::new(),
            styles,
            width,
            style_stack: Vec::new(),
            current: Vec::new(),
            lists: Vec::new(),
            pending_marker: None,
            in_code_block: false,
            quote_depth: 0,
            link_targets: Vec::new(),
            table: None,
        }
    }

    fn run<'a>(&mut self, parser: impl Iterator<Item = Event<'a>>) {
        for event in parser {
            self.handle_event(event);
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        self.lines
    }

    #[allow(clippy::too_many_lines)]
    fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush_line();
                let style = self.heading_style(level);
                self.style_stack.push(style);
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush_line();
                self.style_stack.pop();
                self.blank_line();
            }

            Event::End(TagEnd::Paragraph) => {
                self.flush_line();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }

            Event::Start(Tag::Emphasis) => self.style_stack.push(self.styles.emphasis),
            Event::Start(Tag::Strong) => self.style_stack.push(self.styles.strong),
            Event::Start(Tag::Strikethrough) => self.style_stack.push(self.styles.strikethrough),
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough) => {
                self.style_stack.pop();
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                self.style_stack.push(self.styles.link);
                self.link_targets.push(dest_url.into_string());
            }
            Event::End(TagEnd::Link) => {
                self.style_stack.pop();
                if let Some(url) = self.link_targets.pop() {
                    if !url.is_empty() && !url.starts_with('#') {
                        self.push_span(format!(" ({url})"), self.styles.muted);
                    }
                }
            }

            Event::Start(Tag::Image { .. }) => self.push_span("[image: ".into(), self.styles.muted),
            Event::End(TagEnd::Image) => self.push_span("]".into(), self.styles.muted),

            Event::Start(Tag::CodeBlock(kind)) => {
                self.flush_line();
                self.in_code_block = true;
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        let label = Span::styled(format!("  {lang}"), self.styles.muted);
                        self.lines.push(Line::from(label));
                    }
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                self.flush_line();
                self.in_code_block = false;
                self.blank_line();
            }

            Event::Start(Tag::List(start)) => {
                self.flush_line();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.flush_line();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            Event::Start(Tag::Item) => {
                self.flush_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.pending_marker = Some(format!("{indent}{marker}"));
            }
            Event::End(TagEnd::Item) => self.flush_line(),
            Event::TaskListMarker(checked) => {
                let checkbox = if checked { "[x] " } else { "[ ] " };
                match self.pending_marker.as_mut() {
                    Some(marker) => marker.push_str(checkbox),
                    None => self.pending_marker = Some(checkbox.to_string()),
                }
            }

            Event::Start(Tag::BlockQuote) => {
                self.flush_line();
                self.quote_depth += 1;
            }
            Event::End(TagEnd::BlockQuote) => {
                self.flush_line();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                if self.quote_depth == 0 {
                    self.blank_line();
                }
            }

            Event::Start(Tag::Table(_)) => {
                self.flush_line();
                self.table = Some(TableBuffer::default());
            }
            Event::End(TagEnd::TableCell) => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            Event::End(TagEnd::TableHead) => {
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                    table.has_header = true;
                }
            }
            Event::End(TagEnd::TableRow) => {
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                }
            }
            Event::End(TagEnd::Table) => {
                if let Some(table) = self.table.take() {
                    self.render_table(&table);
                    self.blank_line();
                }
            }

            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push_str(&code);
                } else {
                    self.push_span(format!("`{code}`"), self.styles.code);
                }
            }
            Event::InlineHtml(html) => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push_str(&html);
                } else {
                    self.push_span(html.into_string(), self.styles.muted);
                }
            }
            Event::Html(html) => {
                for line in html.lines() {
                    self.push_span(line.to_string(), self.styles.muted);
                    self.flush_line();
                }
            }
            Event::FootnoteReference(name) => self.add_text(&format!("[^{name}]")),

            Event::SoftBreak => self.add_text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                let width = self.width.clamp(3, MAX_RULE_WIDTH);
                self.lines.push(Line::from(Span::styled("─".repeat(width), self.styles.rule)));
                self.blank_line();
            }

            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }

        if self.in_code_block {
            let indent = "  ".repeat(self.lists.len());
            for line in text.lines() {
                self.current.push(Span::styled(
                    format!("{indent}  {line}"),
                    self.styles.code_block,
                ));
                self.flush_line();
            }
            return;
        }

        let style = self.current_style();
        self.push_span(text.to_string(), style);
    }

    /// Append a span, opening the line with quote bars and any list marker.
    fn push_span(&mut self, text: String, style: Style) {
        if self.current.is_empty() {
            if self.quote_depth > 0 {
                self.current.push(Span::styled(
                    "│ ".repeat(self.quote_depth),
                    self.styles.blockquote,
                ));
            }
            if let Some(marker) = self.pending_marker.take() {
                self.current.push(Span::styled(marker, self.styles.list_marker));
            }
        }
        self.current.push(Span::styled(text, style));
    }

    fn render_table(&mut self, table: &TableBuffer) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &table.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        for (r, row) in table.rows.iter().enumerate() {
            let is_header = table.has_header && r == 0;
            let cell_style = if is_header {
                self.styles.text.patch(self.styles.strong)
            } else {
                self.styles.text
            };

            let mut spans = Vec::new();
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", self.styles.rule));
                }
                let cell = row.get(i).map_or("", String::as_str);
                let pad = width.saturating_sub(cell.width());
                spans.push(Span::styled(format!("{cell}{}", " ".repeat(pad)), cell_style));
            }
            self.lines.push(Line::from(spans));

            if is_header {
                let divider: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
                self.lines.push(Line::from(Span::styled(
                    divider.join("─┼─"),
                    self.styles.rule,
                )));
            }
        }
    }

    fn current_style(&self) -> Style {
        let base = if self.quote_depth > 0 {
            self.styles.blockquote
        } else {
            self.styles.text
        };
        self.style_stack.iter().fold(base, |acc, s| acc.patch(*s))
    }

    fn heading_style(&self, level: HeadingLevel) -> Style {
        match level {
            HeadingLevel::H1 => self.styles.h1,
            HeadingLevel::H2 => self.styles.h2,
            _ => self.styles.h3,
        }
    }

    fn flush_line(&mut self) {
        if !self.current.is_empty() {
            let spans = std::mem::take(&mut self.current);
            self.lines.push(Line::from(spans));
        }
    }

    /// Separate blocks with one empty line, never more.
    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(Line::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::line_text;
    use ratatui::style::Modifier;

    fn render(md: &str) -> Vec<String> {
        render_markdown(md, 40, &MarkdownStyles::default())
            .iter()
            .map(line_text)
            .collect()
    }

    #[test]
    fn test_render_empty() {
        assert!(render("").is_empty());
    }

    #[test]
    fn test_paragraphs_are_separated_once() {
        assert_eq!(render("First.\n\nSecond."), vec!["First.", "", "Second."]);
    }

    #[test]
    fn test_heading_is_styled() {
        let styles = MarkdownStyles::default();
        let lines = render_markdown("# Key Takeaway", 40, &styles);
        assert_eq!(line_text(&lines[0]), "Key Takeaway");
        let style = lines[0].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_nested_emphasis_combines_styles() {
        let lines = render_markdown("**bold *both***", 40, &MarkdownStyles::default());
        let both = lines[0].spans.last().unwrap();
        assert_eq!(both.content, "both");
        assert!(both.style.add_modifier.contains(Modifier::BOLD));
        assert!(both.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn test_ordered_list_is_numbered() {
        assert_eq!(
            render("1. Sun\n2. Water\n3. Air"),
            vec!["1. Sun", "2. Water", "3. Air"]
        );
    }

    #[test]
    fn test_nested_bullets_are_indented() {
        assert_eq!(render("- a\n  - b"), vec!["• a", "  • b"]);
    }

    #[test]
    fn test_task_list_checkboxes() {
        assert_eq!(
            render("- [ ] open\n- [x] done"),
            vec!["• [ ] open", "• [x] done"]
        );
    }

    #[test]
    fn test_code_block_keeps_lines() {
        let lines = render("```rust\nfn main() {\n}\n```");
        assert_eq!(lines, vec!["  rust", "  fn main() {", "  }"]);
    }

    #[test]
    fn test_blockquote_has_bar() {
        assert_eq!(render("> quoted"), vec!["│ quoted"]);
    }

    #[test]
    fn test_link_shows_target() {
        assert_eq!(
            render("[docs](https://example.com)"),
            vec!["docs (https://example.com)"]
        );
    }

    #[test]
    fn test_raw_html_is_literal() {
        let lines = render("Click <b>here</b>");
        assert_eq!(lines, vec!["Click <b>here</b>"]);
    }

    #[test]
    fn test_table_columns_align() {
        let lines = render("| Term | Meaning |\n|---|---|\n| ATP | energy |\n");
        assert_eq!(lines[0], "Term │ Meaning");
        assert_eq!(lines[1], format!("{}┼{}", "─".repeat(5), "─".repeat(8)));
        assert_eq!(lines[2], "ATP  │ energy ");
    }

    #[test]
    fn test_rule_spans_width() {
        let lines = render_markdown("a\n\n---\n\nb", 10, &MarkdownStyles::default());
        assert!(lines.iter().any(|l| line_text(l) == "─".repeat(10)));
    }
}
