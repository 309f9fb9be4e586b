//! Width-aware wrapping of styled lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Plain text of a line with styles dropped.
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Wrap lines to `width` terminal columns, keeping span styles.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return lines;
    }
    lines
        .into_iter()
        .flat_map(|line| wrap_line(line, width))
        .collect()
}

fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let plain = line_text(&line);
    if plain.width() <= width {
        return vec![line];
    }

    let styled: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect();

    let mut pos = 0;
    let mut out = Vec::new();
    for row in textwrap::wrap(&plain, width) {
        // textwrap drops the whitespace at each break
        while pos < styled.len()
            && styled[pos].0.is_whitespace()
            && !row.starts_with(styled[pos].0)
        {
            pos += 1;
        }

        let mut spans: Vec<Span<'static>> = Vec::new();
        for _ in row.chars() {
            let Some(&(ch, style)) = styled.get(pos) else {
                break;
            };
            pos += 1;
            match spans.last_mut() {
                Some(last) if last.style == style => last.content.to_mut().push(ch),
                _ => spans.push(Span::styled(ch.to_string(), style)),
            }
        }
        out.push(Line::from(spans).style(line.style));
    }

    if out.is_empty() {
        out.push(Line::default());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_short_line_is_untouched() {
        let wrapped = wrap_lines(vec![Line::from("Short")], 20);
        assert_eq!(wrapped.len(), 1);
        assert_eq!(line_text(&wrapped[0]), "Short");
    }

    #[test]
    fn test_long_line_fits_width() {
        let wrapped = wrap_lines(
            vec![Line::from("Leaves turn sunlight, water and air into sugar")],
            12,
        );
        assert!(wrapped.len() > 2);
        for line in &wrapped {
            assert!(line_text(line).width() <= 12);
        }
    }

    #[test]
    fn test_styles_survive_the_break() {
        let red = Style::default().fg(Color::Red);
        let blue = Style::default().fg(Color::Blue);
        let line = Line::from(vec![
            Span::styled("alpha beta ", red),
            Span::styled("gamma delta", blue),
        ]);
        let wrapped = wrap_lines(vec![line], 11);

        assert_eq!(line_text(&wrapped[0]), "alpha beta");
        assert_eq!(wrapped[0].spans[0].style, red);
        let last = wrapped.last().unwrap();
        assert_eq!(line_text(last), "gamma delta");
        assert!(last.spans.iter().all(|s| s.style == blue));
    }

    #[test]
    fn test_wide_characters_count_double() {
        let wrapped = wrap_lines(vec![Line::from("你好 世界 你好 世界")], 6);
        assert!(wrapped.len() >= 2);
        let rejoined: String = wrapped.iter().map(line_text).collect();
        assert!(rejoined.contains("世界"));
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        let lines = vec![Line::from("anything at all")];
        assert_eq!(wrap_lines(lines.clone(), 0), lines);
    }
}
