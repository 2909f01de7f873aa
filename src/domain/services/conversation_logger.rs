#[cfg(test)]
#[path = "conversation_logger_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Result;
use chrono::Utc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::models::LogEvent;
use crate::domain::models::LogRecord;
use crate::domain::models::LogSinkBox;

struct LoggerSession {
    id: String,
    started: bool,
}

/// Delivers conversation events to a log sink, tagged with an identifier for
/// the current logical conversation. Delivery is best effort: failures are
/// reported through tracing and dropped.
pub struct ConversationLogger {
    sink: LogSinkBox,
    session: Mutex<LoggerSession>,
}

pub type ConversationLoggerBox = Arc<ConversationLogger>;

pub fn generate_session_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    return format!("session_{}_{}", Utc::now().timestamp_millis(), &suffix[..9]);
}

impl ConversationLogger {
    pub fn new(sink: LogSinkBox) -> ConversationLogger {
        return ConversationLogger {
            sink,
            session: Mutex::new(LoggerSession {
                id: generate_session_id(),
                started: false,
            }),
        };
    }

    fn lock(&self) -> MutexGuard<'_, LoggerSession> {
        return self
            .session
            .lock()
            .unwrap_or_else(|poisoned| return poisoned.into_inner());
    }

    pub fn session_id(&self) -> String {
        return self.lock().id.to_string();
    }

    /// Starts a new logical conversation. The next logged event is preceded
    /// by a fresh session start.
    pub fn rotate_session(&self) {
        let mut session = self.lock();
        session.id = generate_session_id();
        session.started = false;
        tracing::debug!(session_id = %session.id, "rotated conversation log session");
    }

    async fn send(&self, session_id: &str, event: LogEvent) -> Result<()> {
        let line = LogRecord::new(session_id, event).render(self.sink.format())?;
        return self.sink.append(&line).await;
    }

    pub async fn log_session_start(&self) {
        let session_id = {
            let mut session = self.lock();
            if session.started {
                return;
            }
            // Flagged before sending so concurrent callers never log twice.
            session.started = true;
            session.id.to_string()
        };

        if let Err(err) = self.send(&session_id, LogEvent::SessionStart).await {
            tracing::warn!(error = ?err, session_id = %session_id, "failed to log session start");
        }
    }

    pub async fn log_conversation(&self, question: &str, answer: &str) {
        self.log_session_start().await;

        let event = LogEvent::Conversation {
            user_question: question.trim().to_string(),
            ai_answer: answer.trim().to_string(),
        };
        if let Err(err) = self.send(&self.session_id(), event).await {
            tracing::warn!(error = ?err, "failed to log conversation");
        }
    }

    pub async fn log_error(&self, error: &str, context: &str) {
        let event = LogEvent::Error {
            error: error.to_string(),
            context: context.to_string(),
        };
        if let Err(err) = self.send(&self.session_id(), event).await {
            tracing::warn!(error = ?err, context, "failed to log error");
        }
    }

    pub fn spawn_conversation(self: &Arc<Self>, question: &str, answer: &str) -> JoinHandle<()> {
        let logger = self.clone();
        let question = question.to_string();
        let answer = answer.to_string();

        return tokio::spawn(async move {
            logger.log_conversation(&question, &answer).await;
        });
    }

    pub fn spawn_error(self: &Arc<Self>, error: &str, context: &str) -> JoinHandle<()> {
        let logger = self.clone();
        let error = error.to_string();
        let context = context.to_string();

        return tokio::spawn(async move {
            logger.log_error(&error, &context).await;
        });
    }
}
