#[cfg(test)]
#[path = "log_event_test.rs"]
mod tests;

use anyhow::Result;
use chrono::DateTime;
use chrono::Local;
use chrono::Utc;
use serde_derive::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines, as written to the conversation log file.
    Text,
    /// The JSON payload accepted by the log-conversation endpoint.
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    SessionStart,
    Conversation {
        #[serde(rename = "userQuestion")]
        user_question: String,
        #[serde(rename = "aiAnswer")]
        ai_answer: String,
    },
    Error {
        error: String,
        context: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    #[serde(flatten)]
    pub event: LogEvent,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    pub fn new(session_id: &str, event: LogEvent) -> LogRecord {
        return LogRecord {
            event,
            session_id: session_id.to_string(),
            timestamp: Utc::now(),
        };
    }

    fn local_timestamp(&self) -> String {
        return self
            .timestamp
            .with_timezone(&Local)
            .format("%m/%d/%Y, %H:%M:%S")
            .to_string();
    }

    pub fn render(&self, format: LogFormat) -> Result<String> {
        if format == LogFormat::Json {
            return Ok(serde_json::to_string(self)?);
        }

        let line = match &self.event {
            LogEvent::SessionStart => {
                format!("\n=== Session Started: {} ===\n", self.local_timestamp())
            }
            LogEvent::Conversation {
                user_question,
                ai_answer,
            } => format!("User question: {user_question}\nAI Answer: {ai_answer}\n\n"),
            LogEvent::Error { error, context } => {
                let mut context_suffix = "".to_string();
                if !context.is_empty() {
                    context_suffix = format!(" (Context: {context})");
                }

                format!(
                    "ERROR: {error}{context_suffix}\nTimestamp: {}\n\n",
                    self.local_timestamp()
                )
            }
        };

        return Ok(line);
    }
}
