#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::sync::Arc;

use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::ChatController;
use super::ConversationLoggerBox;
use super::HistoryList;
use super::PendingExchange;
use super::PreferencesStore;
use super::SalesRepsState;
use super::SalesRepsView;
use super::Scroll;
use crate::domain::models::BackendBox;
use crate::domain::models::ChatEvent;
use crate::domain::models::Event;
use crate::domain::models::Palette;
use crate::domain::models::Preferences;
use crate::domain::models::SalesRep;
use crate::domain::models::Section;
use crate::domain::models::SlashCommand;
use crate::domain::models::ThemeName;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /clear (/c) - Clears the chat history and starts a new conversation.
- /sound - Toggles the answer notification sound.
- /theme [gaia,shinra] - Switches the colour theme, or toggles it when no name is given.
- /quit /exit (/q) - Exit SalesDesk.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Enter - Send the question
- ALT+Enter - Insert a newline
- ESC - Stop waiting for the current answer
- CTRL+C - Stop waiting for the current answer if in progress, otherwise exit.
- CTRL+L - Clear the chat history
- CTRL+R - Resubmit your last question
- TAB - Switch between Sales Reps and AI Chat
- CTRL+B - Dock or undock the sidebar
- CTRL+T - Toggle the theme
- CTRL+S - Toggle the sound
- Up/Down arrows, PageUp/PageDown, CTRL+U/CTRL+D - Scroll
- r - Reload sales reps, when the Sales Reps section is open
    "#;

    return text.trim().to_string();
}

pub struct AppState {
    backend: BackendBox,
    tx: mpsc::UnboundedSender<Event>,
    store: Arc<PreferencesStore>,
    pub chat: ChatController,
    pub history_list: HistoryList,
    pub scroll: Scroll,
    pub sales_reps: SalesRepsView,
    pub section: Section,
    pub sidebar_docked: bool,
    pub help_visible: bool,
    pub preferences: Preferences,
    pub username: String,
    pub notice: Option<String>,
    pub bell_pending: bool,
    pub last_known_height: u16,
    pub last_known_width: u16,
}

impl AppState {
    pub fn new(
        backend: BackendBox,
        logger: ConversationLoggerBox,
        store: PreferencesStore,
        preferences: Preferences,
        username: &str,
        tx: mpsc::UnboundedSender<Event>,
    ) -> AppState {
        return AppState {
            chat: ChatController::new(backend.clone(), logger, tx.clone()),
            backend,
            tx,
            store: Arc::new(store),
            history_list: HistoryList::new(),
            scroll: Scroll::default(),
            sales_reps: SalesRepsView::default(),
            section: Section::Chat,
            sidebar_docked: false,
            help_visible: false,
            preferences,
            username: username.to_string(),
            notice: None,
            bell_pending: false,
            last_known_height: 0,
            last_known_width: 0,
        };
    }

    pub fn palette(&self) -> Palette {
        return Palette::get(self.preferences.theme());
    }

    pub fn reload_sales_reps(&mut self) {
        self.sales_reps.state = SalesRepsState::Loading;

        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let res = backend
                .list_sales_reps()
                .await
                .map_err(|err| return err.to_string());
            if let Err(err) = &res {
                tracing::error!(error = %err, "failed to fetch sales reps");
            }

            if tx.send(Event::SalesRepsLoaded(res)).is_err() {
                tracing::debug!("event channel closed before sales reps loaded");
            }
        });
    }

    pub fn handle_sales_reps(&mut self, res: Result<Vec<SalesRep>, String>) {
        self.sales_reps.set_result(res);
    }

    fn save_preferences(&self) {
        let store = self.store.clone();
        let preferences = self.preferences.clone();
        tokio::spawn(async move {
            if let Err(err) = store.save(&preferences).await {
                tracing::warn!(error = ?err, "failed to save preferences");
            }
        });
    }

    pub fn toggle_sound(&mut self) {
        self.preferences.sound_enabled = !self.preferences.sound_enabled;
        self.save_preferences();
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        self.preferences.selected_theme = theme.to_string();
        self.save_preferences();
        self.sync_dependants();
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.preferences.theme().toggle());
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_docked = !self.sidebar_docked;
    }

    pub fn switch_section(&mut self) {
        self.section = self.section.next();
    }

    pub fn handle_chat_event(&mut self, event: ChatEvent) {
        if self.chat.handle(event) {
            if self.preferences.sound_enabled {
                self.bell_pending = true;
            }
            self.scroll.top();
        }

        self.sync_dependants();
    }

    /// Returns true when the input was a question that was sent.
    pub fn submit_question(&mut self, text: &str) -> bool {
        self.notice = None;
        let submitted = self.chat.submit(text);
        if submitted {
            self.scroll.top();
        }

        self.sync_dependants();
        return submitted;
    }

    pub fn resubmit(&mut self) -> bool {
        let submitted = self.chat.resubmit();
        self.sync_dependants();
        return submitted;
    }

    pub fn cancel(&mut self) -> bool {
        let cancelled = self.chat.cancel();
        self.sync_dependants();
        return cancelled;
    }

    pub fn clear_chat(&mut self) {
        self.chat.clear();
        self.scroll.top();
        self.sync_dependants();
    }

    /// Returns (should_break, should_continue). `should_continue` is true when
    /// the text was a slash command and must not be sent as a question.
    pub fn handle_slash_commands(&mut self, text: &str) -> (bool, bool) {
        let command = match SlashCommand::parse(text) {
            Some(command) => command,
            None => return (false, false),
        };

        if command.is_quit() {
            return (true, false);
        }

        if command.is_clear() {
            self.clear_chat();
        } else if command.is_help() {
            self.help_visible = true;
        } else if command.is_sound() {
            self.toggle_sound();
        } else if command.is_theme() {
            match command.args.first() {
                Some(name) => match ThemeName::parse(name) {
                    Some(theme) => self.set_theme(theme),
                    None => {
                        self.notice = Some(format!(
                            "Unknown theme {name}. Available themes are gaia and shinra."
                        ));
                    }
                },
                None => self.toggle_theme(),
            }
        }

        return (false, true);
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn sync_dependants(&mut self) {
        let state = self.chat.state();
        let mut pending = None;
        if state.awaiting_response && !state.question.is_empty() {
            pending = Some(PendingExchange {
                question: state.question.to_string(),
                status: state.status.to_string(),
            });
        }

        let palette = self.palette();
        self.history_list.set_entries(
            self.chat.history(),
            pending,
            self.last_known_width.into(),
            &palette,
            &self.username,
        );

        self.scroll
            .set_state(self.history_list.len() as u16, self.last_known_height);
    }
}
