use std::io;
use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Gauge;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Event;
use crate::domain::models::Palette;
use crate::domain::models::Section;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::help_text;
use crate::domain::services::AppState;
use crate::domain::services::ConversationLogger;
use crate::domain::services::PreferencesStore;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::log_sinks::LogSinkManager;

const SIDEBAR_WIDTH: u16 = 18;
const SIDEBAR_DOCKED_WIDTH: u16 = 3;

fn centered_rect(percent_x: u16, percent_y: u16, rect: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(rect);

    return Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1];
}

fn render_header<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    app_state: &AppState,
    palette: &Palette,
) {
    let mut sound = "off";
    if app_state.preferences.sound_enabled {
        sound = "on";
    }

    let muted = Style::default().fg(palette.text_muted);
    let line = Line::from(vec![
        Span::styled(
            " SalesDesk",
            Style::default()
                .fg(palette.primary_accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", muted),
        Span::styled(
            app_state.section.to_string(),
            Style::default().fg(palette.text_main),
        ),
        Span::styled(" │ ", muted),
        Span::styled(format!("Theme: {}", palette.title), muted),
        Span::styled(" │ ", muted),
        Span::styled(format!("Sound: {sound}"), muted),
    ]);

    frame.render_widget(Paragraph::new(line), rect);
}

fn render_sidebar<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    app_state: &AppState,
    palette: &Palette,
) {
    let border_style = Style::default().fg(palette.secondary_accent);
    if app_state.sidebar_docked {
        frame.render_widget(
            Paragraph::new(">")
                .style(Style::default().fg(palette.primary_accent))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(border_style),
                ),
            rect,
        );
        return;
    }

    let lines = Section::iter()
        .map(|section| {
            if section == app_state.section {
                return Line::from(Span::styled(
                    format!("▸ {section}"),
                    Style::default()
                        .fg(palette.primary_accent)
                        .bg(palette.highlight)
                        .add_modifier(Modifier::BOLD),
                ));
            }

            return Line::from(Span::styled(
                format!("  {section}"),
                Style::default().fg(palette.text_main),
            ));
        })
        .collect::<Vec<Line>>();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title("<"),
        ),
        rect,
    );
}

fn render_status_bar<B: Backend>(
    frame: &mut Frame<B>,
    rect: Rect,
    app_state: &AppState,
    palette: &Palette,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(22), Constraint::Min(1)])
        .split(rect);

    let state = app_state.chat.state();
    frame.render_widget(
        Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(palette.primary_accent)
                    .bg(palette.background),
            )
            .percent(state.progress.min(100).into()),
        layout[0],
    );

    let muted = Style::default().fg(palette.text_muted);
    let mut spans = vec![];
    if let Some(notice) = &app_state.notice {
        spans.push(Span::styled(
            format!(" {notice}"),
            Style::default().fg(palette.warning),
        ));
    } else if !state.status.is_empty() {
        spans.push(Span::styled(
            format!(" {}", state.status),
            Style::default().fg(palette.text_main),
        ));
    }

    let elapsed = state.elapsed_label();
    if !elapsed.is_empty() {
        spans.push(Span::styled(format!(" │ {elapsed}"), muted));
    }
    if !state.route.is_empty() {
        spans.push(Span::styled(format!(" │ Route: {}", state.route), muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), layout[1]);
}

fn render_help<B: Backend>(frame: &mut Frame<B>, palette: &Palette) {
    let rect = centered_rect(80, 80, frame.size());
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(help_text())
            .style(Style::default().fg(palette.text_main))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(palette.primary_accent))
                    .title("Help (Esc to close)")
                    .padding(Padding::new(1, 1, 0, 0)),
            ),
        rect,
    );
}

fn insert_paste(textarea: &mut tui_textarea::TextArea, text: &str) {
    for char in text.replace("\r\n", "\n").chars() {
        if char == '\n' {
            textarea.insert_newline();
        } else {
            textarea.insert_char(char);
        }
    }
}

async fn start_loop<B: Backend + Write>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut events = EventsService::new(rx);

    #[cfg(feature = "dev")]
    {
        let test_str = "Which deals did Alice close this quarter?";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
            });
        }
    }

    loop {
        let palette = app_state.palette();
        TextArea::apply_palette(&mut textarea, &palette);
        textarea.set_block(
            TextArea::block(app_state.chat.is_awaiting_response())
                .border_style(Style::default().fg(palette.secondary_accent)),
        );

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Length(1), Constraint::Min(1)])
                .split(frame.size());

            render_header(frame, layout[0], app_state, &palette);

            let mut sidebar_width = SIDEBAR_WIDTH;
            if app_state.sidebar_docked {
                sidebar_width = SIDEBAR_DOCKED_WIDTH;
            }
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Length(sidebar_width), Constraint::Min(1)])
                .split(layout[1]);

            render_sidebar(frame, body[0], app_state, &palette);

            if app_state.section == Section::SalesReps {
                app_state.sales_reps.render(frame, body[1], &palette);
            } else {
                let chat_layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(vec![
                        Constraint::Length(4),
                        Constraint::Length(1),
                        Constraint::Min(1),
                    ])
                    .split(body[1]);

                frame.render_widget(textarea.widget(), chat_layout[0]);
                render_status_bar(frame, chat_layout[1], app_state, &palette);

                let history_rect = chat_layout[2];
                if history_rect.width != app_state.last_known_width
                    || history_rect.height != app_state.last_known_height
                {
                    app_state.set_rect(history_rect);
                }

                app_state
                    .history_list
                    .render(frame, history_rect, app_state.scroll.position);
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    history_rect.inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            if app_state.help_visible {
                render_help(frame, &palette);
            }
        })?;

        if app_state.bell_pending {
            app_state.bell_pending = false;
            terminal.backend_mut().write_all(b"\x07")?;
            std::io::Write::flush(terminal.backend_mut())?;
        }

        match events.next().await? {
            Event::Chat(event) => {
                app_state.handle_chat_event(event);
            }
            Event::SalesRepsLoaded(res) => {
                app_state.handle_sales_reps(res);
            }
            Event::KeyboardCTRLC() => {
                if app_state.cancel() {
                    continue;
                }
                break;
            }
            Event::KeyboardEsc() => {
                if app_state.help_visible {
                    app_state.help_visible = false;
                    continue;
                }
                app_state.cancel();
            }
            Event::KeyboardCTRLL() => {
                app_state.clear_chat();
            }
            Event::KeyboardCTRLR() => {
                if app_state.section == Section::SalesReps {
                    app_state.reload_sales_reps();
                } else {
                    app_state.resubmit();
                }
            }
            Event::KeyboardCTRLB() => {
                app_state.toggle_sidebar();
            }
            Event::KeyboardCTRLS() => {
                app_state.toggle_sound();
            }
            Event::KeyboardCTRLT() => {
                app_state.toggle_theme();
            }
            Event::KeyboardTab() => {
                app_state.switch_section();
            }
            Event::KeyboardEnter() => {
                if app_state.section != Section::Chat {
                    continue;
                }

                let input_str = TextArea::text(&textarea);
                if input_str.trim().is_empty() {
                    continue;
                }

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(input_str.trim());
                if should_break {
                    break;
                }
                if should_continue {
                    textarea = TextArea::default();
                    continue;
                }

                if app_state.submit_question(&input_str) {
                    textarea = TextArea::default();
                }
            }
            Event::KeyboardPaste(text) => {
                if app_state.section == Section::Chat {
                    insert_paste(&mut textarea, &text);
                }
            }
            Event::KeyboardCharInput(input) => {
                if app_state.section == Section::SalesReps {
                    if let Input {
                        key: Key::Char('r'),
                        ctrl: false,
                        alt: false,
                        ..
                    } = input
                    {
                        app_state.reload_sales_reps();
                    }
                    continue;
                }

                textarea.input(input);
            }
            Event::UIScrollDown() => {
                if app_state.section == Section::SalesReps {
                    app_state.sales_reps.scroll.down();
                } else {
                    app_state.scroll.down();
                }
            }
            Event::UIScrollUp() => {
                if app_state.section == Section::SalesReps {
                    app_state.sales_reps.scroll.up();
                } else {
                    app_state.scroll.up();
                }
            }
            Event::UIScrollPageDown() => {
                if app_state.section == Section::SalesReps {
                    app_state.sales_reps.scroll.down_page();
                } else {
                    app_state.scroll.down_page();
                }
            }
            Event::UIScrollPageUp() => {
                if app_state.section == Section::SalesReps {
                    app_state.sales_reps.scroll.up_page();
                } else {
                    app_state.scroll.up_page();
                }
            }
            Event::UIResize() | Event::UITick() => {}
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let backend = BackendManager::get()?;
    let logger = Arc::new(ConversationLogger::new(LogSinkManager::get(
        &Config::get(ConfigKey::LogSink),
    )?));
    let store = PreferencesStore::default();
    let preferences = store.load().await;

    let mut app_state = AppState::new(
        backend.clone(),
        logger,
        store,
        preferences,
        &Config::get(ConfigKey::Username),
        tx,
    );
    if let Err(err) = backend.health_check().await {
        tracing::warn!(error = ?err, "sales API health check failed");
        app_state.notice = Some(err.to_string());
    }
    app_state.reload_sales_reps();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let res = start_loop(&mut terminal, &mut app_state, rx).await;
    app_state.cancel();

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
