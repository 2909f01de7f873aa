#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use pulldown_cmark::CodeBlockKind;
use pulldown_cmark::Event as MarkdownEvent;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use regex::Regex;
use syntect::easy::HighlightLines;

use super::Syntaxes;
use super::SYNTAX_SET;
use crate::domain::models::Palette;

static NUMBERED_MARKER: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"^([ \t]*)(\d+)[.)][ \t]+").unwrap();
});
// Without a space only `1)x` and `1.Text` count as markers, so `2024.Q1` and
// `3.5` stay as written.
static TIGHT_PAREN_MARKER: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"^([ \t]*)(\d+)\)([^\d\s])").unwrap();
});
static TIGHT_DOT_MARKER: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"^([ \t]*)(\d{1,2})\.(\p{L})").unwrap();
});
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"^[ \t]*\d+\. ").unwrap();
});

pub struct Markdown {}

impl Markdown {
    /// Rewrites `1)`, `1.Text` and `1.   Text` markers to `1. Text` and drops
    /// blank lines separating consecutive numbered items, so loosely
    /// formatted answers still render as a single list.
    pub fn normalize(text: &str) -> String {
        let mut in_fence = false;
        let lines = text
            .lines()
            .map(|line| {
                if line.trim_start().starts_with("```") {
                    in_fence = !in_fence;
                    return line.to_string();
                }
                if in_fence {
                    return line.to_string();
                }

                if NUMBERED_MARKER.is_match(line) {
                    return NUMBERED_MARKER.replace(line, "$1$2. ").to_string();
                }
                if TIGHT_PAREN_MARKER.is_match(line) {
                    return TIGHT_PAREN_MARKER.replace(line, "$1$2. $3").to_string();
                }

                return TIGHT_DOT_MARKER.replace(line, "$1$2. $3").to_string();
            })
            .collect::<Vec<String>>();

        let mut res: Vec<&str> = vec![];
        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                let prev_numbered = res
                    .last()
                    .map(|prev| return NUMBERED_ITEM.is_match(prev))
                    .unwrap_or(false);
                let next_numbered = lines[idx..]
                    .iter()
                    .find(|next| return !next.trim().is_empty())
                    .map(|next| return NUMBERED_ITEM.is_match(next))
                    .unwrap_or(false);

                if prev_numbered && next_numbered {
                    continue;
                }
            }

            res.push(line);
        }

        return res.join("\n").trim_end().to_string();
    }

    pub fn render(text: &str, palette: &Palette) -> Vec<Line<'static>> {
        let normalized = Markdown::normalize(&text.replace('\t', "  "));
        let mut writer = MarkdownWriter::new(palette);
        for event in Parser::new_ext(&normalized, Options::ENABLE_STRIKETHROUGH) {
            writer.handle(event);
        }

        return writer.finish();
    }
}

struct MarkdownWriter<'p> {
    palette: &'p Palette,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    quote_depth: usize,
    code_block: Option<(String, String)>,
}

impl<'p> MarkdownWriter<'p> {
    fn new(palette: &'p Palette) -> MarkdownWriter<'p> {
        return MarkdownWriter {
            palette,
            lines: vec![],
            spans: vec![],
            styles: vec![],
            lists: vec![],
            item_marker: None,
            quote_depth: 0,
            code_block: None,
        };
    }

    fn style(&self) -> Style {
        return self
            .styles
            .iter()
            .fold(Style::default().fg(self.palette.text_main), |acc, style| {
                return acc.patch(*style);
            });
    }

    fn prefix(&mut self) -> Vec<Span<'static>> {
        let mut prefix = vec![];
        if self.quote_depth > 0 {
            prefix.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::default().fg(self.palette.text_muted),
            ));
        }

        if !self.lists.is_empty() {
            let indent = "  ".repeat(self.lists.len() - 1);
            match self.item_marker.take() {
                Some(marker) => {
                    prefix.push(Span::styled(
                        format!("{indent}{marker}"),
                        Style::default().fg(self.palette.primary_accent),
                    ));
                }
                None => prefix.push(Span::from(format!("{indent}  "))),
            }
        }

        return prefix;
    }

    fn flush(&mut self) {
        if self.spans.is_empty() && self.item_marker.is_none() {
            return;
        }

        let mut spans = self.prefix();
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    fn blank(&mut self) {
        let last_is_blank = self
            .lines
            .last()
            .map(|line| return line.width() == 0)
            .unwrap_or(true);

        if !last_is_blank {
            self.lines.push(Line::default());
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Heading(..) => {
                self.flush();
                self.styles.push(
                    Style::default()
                        .fg(self.palette.primary_accent)
                        .add_modifier(Modifier::BOLD),
                );
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let mut lang = "".to_string();
                if let CodeBlockKind::Fenced(info) = kind {
                    lang = info.split(',').next().unwrap_or_default().to_string();
                }
                self.code_block = Some((lang, "".to_string()));
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(number)) => {
                        let marker = format!("{number}. ");
                        *number += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::Emphasis => {
                self.styles
                    .push(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::Strong => {
                self.styles.push(Style::default().add_modifier(Modifier::BOLD));
            }
            Tag::Strikethrough => {
                self.styles
                    .push(Style::default().add_modifier(Modifier::CROSSED_OUT));
            }
            Tag::Link(..) => {
                self.styles.push(
                    Style::default()
                        .fg(self.palette.secondary_accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                self.flush();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::Heading(..) => {
                self.flush();
                self.styles.pop();
                self.blank();
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            Tag::CodeBlock(_) => {
                if let Some((lang, code)) = self.code_block.take() {
                    self.highlight_code(&lang, &code);
                }
                self.blank();
            }
            Tag::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::Item => {
                self.flush();
            }
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link(..) => {
                self.styles.pop();
            }
            _ => {}
        }
    }

    fn highlight_code(&mut self, lang: &str, code: &str) {
        let mut highlight = HighlightLines::new(Syntaxes::get(lang), Syntaxes::theme());
        for line in code.lines() {
            // Highlighting is only accurate when every line ends in a newline.
            let line_nl = format!("{line}\n");
            let mut spans = self.prefix();

            match highlight.highlight_line(&line_nl, &SYNTAX_SET) {
                Ok(segments) => {
                    for (style, content) in segments {
                        let content = content.trim_end_matches('\n');
                        if content.is_empty() {
                            continue;
                        }

                        spans.push(Span::styled(
                            content.to_string(),
                            Style {
                                fg: Syntaxes::translate_colour(style.foreground),
                                ..Style::default()
                            },
                        ));
                    }
                }
                Err(err) => {
                    tracing::debug!(error = ?err, lang, "failed to highlight code line");
                    spans.push(Span::styled(
                        line.to_string(),
                        Style::default().fg(self.palette.text_main),
                    ));
                }
            }

            self.lines.push(Line::from(spans));
        }
    }

    fn handle(&mut self, event: MarkdownEvent) {
        match event {
            MarkdownEvent::Start(tag) => self.start(tag),
            MarkdownEvent::End(tag) => self.end(tag),
            MarkdownEvent::Text(text) => {
                if let Some((_, code)) = self.code_block.as_mut() {
                    code.push_str(&text);
                    return;
                }
                self.push_text(&text);
            }
            MarkdownEvent::Code(code) => {
                self.spans.push(Span::styled(
                    code.to_string(),
                    Style::default()
                        .fg(self.palette.primary_accent)
                        .bg(self.palette.background),
                ));
            }
            MarkdownEvent::Html(html) => self.push_text(html.trim_end()),
            MarkdownEvent::SoftBreak => self.push_text(" "),
            MarkdownEvent::HardBreak => self.flush(),
            MarkdownEvent::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(24),
                    Style::default().fg(self.palette.text_muted),
                )));
                self.blank();
            }
            MarkdownEvent::TaskListMarker(checked) => {
                let mut marker = "[ ] ";
                if checked {
                    marker = "[x] ";
                }
                self.push_text(marker);
            }
            MarkdownEvent::FootnoteReference(name) => self.push_text(&format!("[{name}]")),
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush();
        while self
            .lines
            .last()
            .map(|line| return line.width() == 0)
            .unwrap_or(false)
        {
            self.lines.pop();
        }

        return self.lines;
    }
}
