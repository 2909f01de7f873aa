#[cfg(test)]
#[path = "sales_reps_test.rs"]
mod tests;

use ratatui::prelude::Backend;
use ratatui::prelude::Rect;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Scroll;
use crate::domain::models::DealOutcome;
use crate::domain::models::Palette;
use crate::domain::models::Placeholder;
use crate::domain::models::SalesRep;

#[derive(Clone, Debug, PartialEq)]
pub enum SalesRepsState {
    Loading,
    Loaded(Vec<SalesRep>),
    Failed(String),
}

pub struct SalesRepsView {
    pub state: SalesRepsState,
    pub scroll: Scroll,
}

impl Default for SalesRepsView {
    fn default() -> SalesRepsView {
        return SalesRepsView {
            state: SalesRepsState::Loading,
            scroll: Scroll::default(),
        };
    }
}

fn rep_card(rep: &SalesRep, palette: &Palette) -> Vec<Line<'static>> {
    let muted = Style::default().fg(palette.text_muted);
    let main = Style::default().fg(palette.text_main);
    let label = Style::default()
        .fg(palette.secondary_accent)
        .add_modifier(Modifier::BOLD);

    let mut header = vec![Span::styled(
        rep.name.to_string(),
        Style::default()
            .fg(palette.primary_accent)
            .add_modifier(Modifier::BOLD),
    )];
    header.push(Span::styled(format!(" - {}", rep.role), main));
    if let Some(region) = &rep.region {
        header.push(Span::styled(format!(" ({region})"), muted));
    }

    let mut lines = vec![
        Line::from(header),
        Line::from(Span::styled("─".repeat(24), muted)),
    ];

    let mut skills = rep.skills.join(", ");
    if skills.is_empty() {
        skills = "None listed".to_string();
    }
    lines.push(Line::from(vec![
        Span::styled("Skills: ", label),
        Span::styled(skills, main),
    ]));

    lines.push(Line::from(Span::styled("Deals:", label)));
    if rep.deals.is_empty() {
        lines.push(Line::from(Span::styled("  No deals yet", muted)));
    }
    for deal in &rep.deals {
        let color = match deal.outcome() {
            DealOutcome::Won => palette.success,
            DealOutcome::Pending => palette.warning,
            DealOutcome::Lost => palette.error,
        };
        lines.push(Line::from(Span::styled(
            format!("  • {}", deal.format()),
            Style::default().fg(color),
        )));
    }

    lines.push(Line::from(Span::styled("Clients:", label)));
    if rep.clients.is_empty() {
        lines.push(Line::from(Span::styled("  No clients yet", muted)));
    }
    for client in &rep.clients {
        lines.push(Line::from(vec![
            Span::styled("  • ", main),
            Span::styled(
                client.name.to_string(),
                main.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({})", client.industry), main),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "    Email: {}, Phone: {}",
                client.contact.email, client.contact.phone
            ),
            muted,
        )));
    }

    return lines;
}

impl SalesRepsView {
    pub fn set_result(&mut self, result: Result<Vec<SalesRep>, String>) {
        match result {
            Ok(reps) => self.state = SalesRepsState::Loaded(reps),
            Err(err) => self.state = SalesRepsState::Failed(err),
        }
        self.scroll.top();
    }

    pub fn lines(&self, palette: &Palette) -> Vec<Line<'static>> {
        let reps = match &self.state {
            SalesRepsState::Loaded(reps) => reps,
            _ => return vec![],
        };

        if reps.is_empty() {
            return vec![Line::from(Span::styled(
                "No sales reps found.",
                Style::default().fg(palette.text_muted),
            ))];
        }

        let mut lines = vec![];
        for (idx, rep) in reps.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            lines.extend(rep_card(rep, palette));
        }

        return lines;
    }

    pub fn render<B: Backend>(&mut self, frame: &mut Frame<B>, rect: Rect, palette: &Palette) {
        match &self.state {
            SalesRepsState::Loading => {
                return Placeholder::loading("Loading sales reps...").render(frame, rect, palette);
            }
            SalesRepsState::Failed(err) => {
                let text = format!("Failed to load sales reps: {err}\n\nPress r to retry.");
                return Placeholder::error(&text).render(frame, rect, palette);
            }
            SalesRepsState::Loaded(_) => {}
        }

        let lines = self.lines(palette);
        // Borders and padding take two rows.
        self.scroll
            .set_state(lines.len() as u16, rect.height.saturating_sub(2));

        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(palette.secondary_accent))
                        .title("Sales Reps (r to reload)")
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .scroll((self.scroll.position, 0)),
            rect,
        );
    }
}
