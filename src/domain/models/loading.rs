use ratatui::prelude::Alignment;
use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use ratatui::Frame;

use super::Palette;

/// Placeholder panel for sections still waiting on, or failing, a fetch.
pub struct Placeholder<'a> {
    text: &'a str,
    is_error: bool,
}

impl<'a> Placeholder<'a> {
    pub fn loading(text: &'a str) -> Placeholder<'a> {
        return Placeholder {
            text,
            is_error: false,
        };
    }

    pub fn error(text: &'a str) -> Placeholder<'a> {
        return Placeholder {
            text,
            is_error: true,
        };
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<B>, rect: Rect, palette: &Palette) {
        let mut color = palette.text_muted;
        if self.is_error {
            color = palette.error;
        }

        frame.render_widget(
            Paragraph::new(self.text)
                .style(Style::default().fg(color))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(palette.secondary_accent))
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Center),
            rect,
        );
    }
}
