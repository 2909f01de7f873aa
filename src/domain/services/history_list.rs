#[cfg(test)]
#[path = "history_list_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use super::Markdown;
use crate::domain::models::Author;
use crate::domain::models::ConversationEntry;
use crate::domain::models::Palette;

pub const WELCOME_TEXT: &str =
    "Hey there! Ask me about deals, clients and reps, or anything else on your mind.";
pub const TYPING_TEXT: &str = "Thinking...";

/// The exchange currently waiting on the backend, shown above the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingExchange {
    pub question: String,
    pub status: String,
}

#[derive(Clone, PartialEq)]
struct CacheKey {
    history_len: usize,
    newest: Option<ConversationEntry>,
    pending: Option<PendingExchange>,
    line_width: usize,
    palette_title: &'static str,
    username: String,
}

pub struct HistoryList {
    cache_key: Option<CacheKey>,
    lines: Vec<Line<'static>>,
}

impl Default for HistoryList {
    fn default() -> HistoryList {
        return HistoryList::new();
    }
}

impl HistoryList {
    pub fn new() -> HistoryList {
        return HistoryList {
            cache_key: None,
            lines: vec![],
        };
    }

    /// Rebuilds the rendered lines when the history, the pending exchange,
    /// the width or the palette changed. Returns true when a rebuild happened.
    pub fn set_entries(
        &mut self,
        history: &[ConversationEntry],
        pending: Option<PendingExchange>,
        line_width: usize,
        palette: &Palette,
        username: &str,
    ) -> bool {
        let cache_key = CacheKey {
            history_len: history.len(),
            newest: history.first().cloned(),
            pending,
            line_width,
            palette_title: palette.title,
            username: username.to_string(),
        };
        if self.cache_key.as_ref() == Some(&cache_key) {
            return false;
        }

        let user = Author::User(username.to_string());
        let mut lines = vec![];
        if let Some(pending) = &cache_key.pending {
            lines.extend(
                Bubble::new(
                    user.clone(),
                    Bubble::plain_lines(&pending.question, palette),
                    BubbleAlignment::Right,
                    palette.secondary_accent,
                    line_width,
                )
                .as_lines(),
            );

            let mut status = pending.status.to_string();
            if status.is_empty() {
                status = TYPING_TEXT.to_string();
            }
            lines.extend(
                Bubble::new(
                    Author::Assistant,
                    Bubble::plain_lines(&status, palette),
                    BubbleAlignment::Left,
                    palette.text_muted,
                    line_width,
                )
                .as_lines(),
            );
        }

        for entry in history {
            lines.extend(
                Bubble::new(
                    user.clone(),
                    Bubble::plain_lines(entry.question(), palette),
                    BubbleAlignment::Right,
                    palette.secondary_accent,
                    line_width,
                )
                .as_lines(),
            );

            let mut border_color = palette.primary_accent;
            let mut answer_lines = Markdown::render(entry.answer(), palette);
            if entry.is_apology() {
                border_color = palette.error;
                answer_lines = Bubble::plain_lines(entry.answer(), palette);
            }
            lines.extend(
                Bubble::new(
                    Author::Assistant,
                    answer_lines,
                    BubbleAlignment::Left,
                    border_color,
                    line_width,
                )
                .as_lines(),
            );
        }

        if lines.is_empty() {
            lines = Bubble::new(
                Author::Assistant,
                Bubble::plain_lines(WELCOME_TEXT, palette),
                BubbleAlignment::Left,
                palette.primary_accent,
                line_width,
            )
            .as_lines();
        }

        self.lines = lines;
        self.cache_key = Some(cache_key);
        return true;
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.to_owned())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
