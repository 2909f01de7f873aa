use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

use super::Palette;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn default() -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(TextArea::block(false));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_placeholder_text("Ask about deals, clients or anything else...");

        return textarea;
    }

    pub fn block(awaiting_response: bool) -> Block<'a> {
        let mut title = "Ask a question (Enter to send, Alt+Enter for newline)";
        if awaiting_response {
            title = "Waiting for an answer (Esc to stop)";
        }

        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .padding(Padding::new(1, 1, 0, 0));
    }

    pub fn apply_palette(textarea: &mut tui_textarea::TextArea<'a>, palette: &Palette) {
        textarea.set_style(Style::default().fg(palette.text_main));
        textarea.set_placeholder_style(Style::default().fg(palette.text_muted));
    }

    pub fn text(textarea: &tui_textarea::TextArea<'a>) -> String {
        return textarea.lines().join("\n");
    }
}
