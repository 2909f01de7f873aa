#[cfg(test)]
#[path = "chat_controller_test.rs"]
mod tests;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::ConversationLoggerBox;
use super::ProgressSimulator;
use super::ScheduledTasks;
use crate::domain::models::AnswerResponse;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendError;
use crate::domain::models::ChatEvent;
use crate::domain::models::ChatSessionState;
use crate::domain::models::ConversationEntry;
use crate::domain::models::Event;
use crate::domain::models::STATUS_ERROR;
use crate::domain::models::STATUS_STOPPED;

pub const STATUS_CLEAR_AFTER_SUCCESS: Duration = Duration::from_secs(2);
pub const STATUS_CLEAR_AFTER_FAILURE: Duration = Duration::from_secs(3);

/// Owns a single question/answer exchange at a time. User actions call
/// `submit`, `cancel`, `clear` and `resubmit` directly, everything that
/// completes later comes back through `handle`.
pub struct ChatController {
    backend: BackendBox,
    logger: ConversationLoggerBox,
    tx: mpsc::UnboundedSender<Event>,
    state: ChatSessionState,
    history: Vec<ConversationEntry>,
    scheduled: ScheduledTasks,
    cancel_token: Option<CancellationToken>,
    request_id: u64,
    started_at: Option<Instant>,
    last_question: String,
}

impl ChatController {
    pub fn new(
        backend: BackendBox,
        logger: ConversationLoggerBox,
        tx: mpsc::UnboundedSender<Event>,
    ) -> ChatController {
        return ChatController {
            backend,
            logger,
            scheduled: ScheduledTasks::new(tx.clone()),
            tx,
            state: ChatSessionState::default(),
            history: vec![],
            cancel_token: None,
            request_id: 0,
            started_at: None,
            last_question: "".to_string(),
        };
    }

    pub fn state(&self) -> &ChatSessionState {
        return &self.state;
    }

    /// Newest first.
    pub fn history(&self) -> &[ConversationEntry] {
        return &self.history;
    }

    pub fn is_awaiting_response(&self) -> bool {
        return self.state.awaiting_response;
    }

    pub fn submit(&mut self, question: &str) -> bool {
        let question = question.trim().to_string();
        if question.is_empty() || self.state.awaiting_response {
            return false;
        }

        self.scheduled.cancel_all();
        self.request_id += 1;
        self.state.clear_transient();
        self.state.question = question.to_string();
        self.state.awaiting_response = true;
        self.started_at = Some(Instant::now());
        self.last_question = question.to_string();

        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());

        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let request_id = self.request_id;
        tracing::debug!(request_id, "submitting question");

        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => Err(BackendError::Cancelled),
                res = backend.ask(&question) => res,
            };

            let event = ChatEvent::AnswerReceived { request_id, result };
            if tx.send(Event::Chat(event)).is_err() {
                tracing::debug!(request_id, "event channel closed before answer arrived");
            }
        });

        return true;
    }

    pub fn resubmit(&mut self) -> bool {
        let question = self.last_question.to_string();
        return self.submit(&question);
    }

    /// Stops the outstanding request without waiting for the network call to
    /// fail. Anything the old request still delivers is ignored. Once the
    /// answer has arrived there is nothing left to stop.
    pub fn cancel(&mut self) -> bool {
        let token = match self.cancel_token.take() {
            Some(token) => token,
            None => return false,
        };

        token.cancel();
        self.scheduled.cancel_all();
        self.request_id += 1;
        tracing::debug!(request_id = self.request_id, "request stopped by user");

        self.state.awaiting_response = false;
        self.state.question = "".to_string();
        self.state.progress = 0;
        self.state.status = STATUS_STOPPED.to_string();
        self.schedule_status_clear(STATUS_CLEAR_AFTER_FAILURE);

        return true;
    }

    pub fn clear(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.scheduled.cancel_all();
        self.request_id += 1;

        self.history.clear();
        self.state = ChatSessionState::default();
        self.started_at = None;
        self.last_question = "".to_string();
        self.logger.rotate_session();

        let backend = self.backend.clone();
        tokio::spawn(async move {
            if let Err(err) = backend.clear_conversation().await {
                tracing::warn!(error = ?err, "failed to clear conversation memory");
            }
        });
    }

    /// Applies a completion. Returns true when a new answer was added to the
    /// history.
    pub fn handle(&mut self, event: ChatEvent) -> bool {
        if event.request_id() != self.request_id {
            tracing::debug!(
                request_id = event.request_id(),
                current = self.request_id,
                "dropping stale chat event"
            );
            return false;
        }

        match event {
            ChatEvent::AnswerReceived { result, .. } => {
                self.cancel_token = None;
                self.state.question = "".to_string();
                if let Some(started_at) = self.started_at.take() {
                    self.state.elapsed = Some(started_at.elapsed());
                }

                match result {
                    Ok(res) => return self.handle_answer(res),
                    Err(err) => {
                        self.handle_failure(err);
                        return false;
                    }
                }
            }
            ChatEvent::ProgressStage { stage, .. } => {
                if self.state.awaiting_response {
                    self.state.progress = stage.percent;
                    self.state.status = stage.label;
                }
            }
            ChatEvent::ProgressSettled { .. } => {
                self.state.awaiting_response = false;
                self.schedule_status_clear(STATUS_CLEAR_AFTER_SUCCESS);
            }
            ChatEvent::StatusCleared { .. } => {
                self.state.clear_status();
            }
        }

        return false;
    }

    fn handle_answer(&mut self, res: AnswerResponse) -> bool {
        let route = res.route_type.unwrap_or_default();
        self.state.route = route.to_string();

        let answer = match res.answer {
            Some(answer) => answer,
            None => {
                tracing::warn!(
                    question = %self.last_question,
                    "AI endpoint responded without an answer"
                );
                self.state.awaiting_response = false;
                self.schedule_status_clear(STATUS_CLEAR_AFTER_SUCCESS);
                return false;
            }
        };

        let entry = ConversationEntry::new(&self.last_question, &answer);
        self.logger
            .spawn_conversation(entry.question(), entry.answer());
        self.history.insert(0, entry);

        ProgressSimulator::start(&mut self.scheduled, self.request_id, &route);

        return true;
    }

    fn handle_failure(&mut self, err: BackendError) {
        self.state.awaiting_response = false;
        self.state.progress = 0;

        if err.is_cancellation() {
            self.state.status = STATUS_STOPPED.to_string();
        } else {
            tracing::error!(error = ?err, "question failed");
            self.history
                .insert(0, ConversationEntry::apology(&self.last_question));
            self.state.status = STATUS_ERROR.to_string();
            self.logger.spawn_error(&err.to_string(), "ai_request");
        }

        self.schedule_status_clear(STATUS_CLEAR_AFTER_FAILURE);
    }

    fn schedule_status_clear(&mut self, delay: Duration) {
        self.scheduled.schedule(
            delay,
            ChatEvent::StatusCleared {
                request_id: self.request_id,
            },
        );
    }
}
