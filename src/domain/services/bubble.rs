#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Palette;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct BubbleConfig {
    /// Left border and padding plus right padding and border.
    pub border_elements_length: usize,
    pub scrollbar_length: usize,
    pub outer_padding_percentage: f32,
}

pub struct Bubble {
    alignment: BubbleAlignment,
    author: Author,
    lines: Vec<Line<'static>>,
    border_color: Color,
    window_max_width: usize,
}

fn text_width(text: &str) -> usize {
    return text.chars().count();
}

fn spans_width(spans: &[Span]) -> usize {
    return spans.iter().map(|span| return text_width(&span.content)).sum();
}

impl Bubble {
    pub fn new(
        author: Author,
        lines: Vec<Line<'static>>,
        alignment: BubbleAlignment,
        border_color: Color,
        window_max_width: usize,
    ) -> Bubble {
        return Bubble {
            alignment,
            author,
            lines,
            border_color,
            window_max_width,
        };
    }

    /// Unformatted text, one line per source line.
    pub fn plain_lines(text: &str, palette: &Palette) -> Vec<Line<'static>> {
        return text
            .lines()
            .map(|line| {
                return Line::from(Span::styled(
                    line.replace('\t', "  "),
                    Style::default().fg(palette.text_main),
                ));
            })
            .collect();
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            border_elements_length: 4,
            scrollbar_length: 1,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(self) -> Vec<Line<'static>> {
        let max_line_length = self.get_max_line_length();
        let mut rows: Vec<Vec<Span<'static>>> = vec![];
        for line in &self.lines {
            rows.extend(wrap_spans(line.spans.to_owned(), max_line_length));
        }
        if rows.is_empty() {
            rows.push(vec![]);
        }

        let mut res = vec![self.top_bar(max_line_length)];
        for row in rows {
            res.push(self.spans_to_line(row, max_line_length));
        }
        res.push(self.bottom_bar(max_line_length));

        return res;
    }

    fn get_max_line_length(&self) -> usize {
        let style_config = Bubble::style_config();
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;
        let line_border_width = style_config.border_elements_length
            + style_config.scrollbar_length
            + min_bubble_padding_length;

        let mut max_line_length = self
            .lines
            .iter()
            .map(|line| return spans_width(&line.spans))
            .max()
            .unwrap_or_default()
            .min(self.window_max_width.saturating_sub(line_border_width));

        let title = self.author.to_string();
        if max_line_length < text_width(&title) {
            max_line_length = text_width(&title);
        }

        return max_line_length;
    }

    fn outer_padding(&self, max_line_length: usize) -> String {
        let style_config = Bubble::style_config();
        let count = self.window_max_width.saturating_sub(
            max_line_length + style_config.border_elements_length + style_config.scrollbar_length,
        );

        return " ".repeat(count);
    }

    fn border_span(&self, text: String) -> Span<'static> {
        return Span::styled(text, Style::default().fg(self.border_color));
    }

    fn align(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let padding = Span::from(self.outer_padding(max_line_length));
        if self.alignment == BubbleAlignment::Left {
            spans.push(padding);
            return Line::from(spans);
        }

        let mut line_spans = vec![padding];
        line_spans.extend(spans);
        return Line::from(line_spans);
    }

    fn spans_to_line(&self, mut spans: Vec<Span<'static>>, max_line_length: usize) -> Line<'static> {
        let fill = " ".repeat(max_line_length.saturating_sub(spans_width(&spans)));

        let mut wrapped_spans = vec![self.border_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.border_span(format!("{fill} │")));

        return self.align(wrapped_spans, max_line_length);
    }

    fn top_bar(&self, max_line_length: usize) -> Line<'static> {
        let title = self.author.to_string();
        // Add 2 for the padding inside the vertical bars.
        let inner_bar = "─".repeat((max_line_length + 2).saturating_sub(text_width(&title)));

        return self.align(
            vec![self.border_span(format!("╭{title}{inner_bar}╮"))],
            max_line_length,
        );
    }

    fn bottom_bar(&self, max_line_length: usize) -> Line<'static> {
        let inner_bar = "─".repeat(max_line_length + 2);
        return self.align(
            vec![self.border_span(format!("╰{inner_bar}╯"))],
            max_line_length,
        );
    }
}

/// Splits a line of styled spans into rows no wider than `max_line_length`,
/// breaking on spaces and hard splitting words that can't fit a row.
fn wrap_spans(spans: Vec<Span<'static>>, max_line_length: usize) -> Vec<Vec<Span<'static>>> {
    let mut rows = vec![];
    let mut row: Vec<Span<'static>> = vec![];
    let mut row_width = 0;

    for span in spans {
        let span_width = text_width(&span.content);
        if span_width + row_width <= max_line_length {
            row_width += span_width;
            row.push(span);
            continue;
        }

        let mut word_set: Vec<String> = vec![];
        for word in span.content.split(' ') {
            let mut word = word.to_string();
            // Width of the row once this word, and the space before it, is added.
            let mut separator = 0;
            if !word_set.is_empty() {
                separator = 1;
            }

            if row_width + separator + text_width(&word) > max_line_length
                && (row_width > 0 || !word_set.is_empty())
            {
                if !word_set.is_empty() {
                    row.push(Span::styled(word_set.join(" "), span.style));
                }
                rows.push(row);
                row = vec![];
                word_set = vec![];
                row_width = 0;
                separator = 0;
            }

            while text_width(&word) > max_line_length && max_line_length > 0 {
                let head = word.chars().take(max_line_length).collect::<String>();
                word = word.chars().skip(max_line_length).collect::<String>();
                rows.push(vec![Span::styled(head, span.style)]);
            }

            row_width += separator + text_width(&word);
            word_set.push(word);
        }

        if !word_set.is_empty() {
            row.push(Span::styled(word_set.join(" "), span.style));
        }
    }

    rows.push(row);
    return rows;
}
