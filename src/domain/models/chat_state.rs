use std::time::Duration;

pub const STATUS_STOPPED: &str = "Stopped by user";
pub const STATUS_ERROR: &str = "Error occurred";

/// Transient state of the chat section. Only the controller writes to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatSessionState {
    pub question: String,
    pub awaiting_response: bool,
    pub progress: u8,
    pub status: String,
    pub elapsed: Option<Duration>,
    pub route: String,
}

impl ChatSessionState {
    /// Clears everything shown in the status bar apart from the route label.
    pub fn clear_status(&mut self) {
        self.progress = 0;
        self.status = "".to_string();
        self.elapsed = None;
    }

    pub fn clear_transient(&mut self) {
        self.clear_status();
        self.route = "".to_string();
    }

    pub fn elapsed_label(&self) -> String {
        if let Some(elapsed) = self.elapsed {
            return format!("{:.1}s", elapsed.as_secs_f64());
        }

        return "".to_string();
    }
}
