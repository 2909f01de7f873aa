use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time;

use super::ChatController;
use crate::domain::models::AnswerResponse;
use crate::domain::models::Backend;
use crate::domain::models::BackendError;
use crate::domain::models::ChatSessionState;
use crate::domain::models::ConversationEntry;
use crate::domain::models::Event;
use crate::domain::models::LogSink;
use crate::domain::models::SalesRep;
use crate::domain::models::APOLOGY_ANSWER;
use crate::domain::models::STATUS_ERROR;
use crate::domain::models::STATUS_STOPPED;
use crate::domain::services::ConversationLogger;

struct FakeBackend {
    response: Result<AnswerResponse, BackendError>,
    delay: Duration,
    questions: Mutex<Vec<String>>,
    clears: AtomicUsize,
}

impl FakeBackend {
    fn new(response: Result<AnswerResponse, BackendError>, delay: Duration) -> Arc<FakeBackend> {
        return Arc::new(FakeBackend {
            response,
            delay,
            questions: Mutex::new(vec![]),
            clears: AtomicUsize::new(0),
        });
    }

    fn answering(answer: &str, route_type: Option<&str>) -> Arc<FakeBackend> {
        return FakeBackend::new(
            Ok(AnswerResponse::new(answer, route_type)),
            Duration::from_millis(1500),
        );
    }

    fn questions(&self) -> Vec<String> {
        return self.questions.lock().unwrap().clone();
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn ask(&self, question: &str) -> Result<AnswerResponse, BackendError> {
        self.questions.lock().unwrap().push(question.to_string());
        time::sleep(self.delay).await;
        return self.response.clone();
    }

    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>> {
        return Ok(vec![]);
    }

    async fn clear_conversation(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        return Ok(());
    }
}

#[derive(Default)]
struct MemorySink {
    lines: Mutex<Vec<String>>,
}

#[async_trait]
impl LogSink for MemorySink {
    async fn append(&self, line: &str) -> Result<()> {
        self.lines.lock().unwrap().push(line.to_string());
        return Ok(());
    }
}

struct Harness {
    controller: ChatController,
    rx: mpsc::UnboundedReceiver<Event>,
    sink: Arc<MemorySink>,
    logger: Arc<ConversationLogger>,
}

impl Harness {
    fn new(backend: Arc<FakeBackend>) -> Harness {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let sink = Arc::new(MemorySink::default());
        let logger = Arc::new(ConversationLogger::new(sink.clone()));

        return Harness {
            controller: ChatController::new(backend, logger.clone(), tx),
            rx,
            sink,
            logger,
        };
    }

    /// Applies every chat event delivered within the window and returns the
    /// state observed after each one.
    async fn run_for(&mut self, window: Duration) -> Vec<ChatSessionState> {
        let deadline = time::Instant::now() + window;
        let mut states = vec![];

        loop {
            match time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(Event::Chat(event))) => {
                    self.controller.handle(event);
                    states.push(self.controller.state().clone());
                }
                Ok(Some(_)) => {}
                _ => return states,
            }
        }
    }

    fn log_lines(&self) -> Vec<String> {
        return self.sink.lines.lock().unwrap().clone();
    }
}

#[tokio::test(start_paused = true)]
async fn it_submits_the_trimmed_question_once() {
    let backend = FakeBackend::answering("Hi.", None);
    let mut harness = Harness::new(backend.clone());

    assert!(harness.controller.submit("  What deals closed?  "));
    assert!(harness.controller.is_awaiting_response());
    assert_eq!(harness.controller.state().question, "What deals closed?");

    harness.run_for(Duration::from_secs(5)).await;
    assert_eq!(backend.questions(), vec!["What deals closed?"]);
}

#[tokio::test(start_paused = true)]
async fn it_ignores_blank_questions() {
    let backend = FakeBackend::answering("Hi.", None);
    let mut harness = Harness::new(backend.clone());

    assert!(!harness.controller.submit(""));
    assert!(!harness.controller.submit(" \n\t "));
    assert!(!harness.controller.is_awaiting_response());

    harness.run_for(Duration::from_secs(5)).await;
    assert!(backend.questions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_rejects_submissions_while_in_flight() {
    let backend = FakeBackend::answering("Hi.", None);
    let mut harness = Harness::new(backend.clone());

    assert!(harness.controller.submit("first"));
    assert!(!harness.controller.submit("second"));
    assert!(harness.controller.is_awaiting_response());
    assert!(harness.controller.history().is_empty());

    harness.run_for(Duration::from_secs(5)).await;
    assert_eq!(backend.questions(), vec!["first"]);
    assert_eq!(harness.controller.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn it_completes_a_sales_question() {
    let backend = FakeBackend::answering("3 deals closed.", Some("sales"));
    let mut harness = Harness::new(backend);

    assert!(harness.controller.submit("What deals closed this quarter?"));
    let states = harness.run_for(Duration::from_secs(10)).await;

    // Answer, four stages, settle and the status clear.
    assert_eq!(states.len(), 7);
    assert!(states[0].awaiting_response);
    assert_eq!(states[0].question, "");
    assert_eq!(states[0].elapsed_label(), "1.5s");
    assert_eq!(
        states[1..5]
            .iter()
            .map(|state| return state.progress)
            .collect::<Vec<u8>>(),
        vec![20, 45, 75, 100]
    );
    assert_eq!(states[4].status, "Complete");
    assert!(!states[5].awaiting_response);

    assert_eq!(
        harness.controller.history(),
        vec![ConversationEntry::new(
            "What deals closed this quarter?",
            "3 deals closed."
        )]
    );
    let state = harness.controller.state();
    assert_eq!(state.status, "");
    assert_eq!(state.progress, 0);
    assert_eq!(state.elapsed, None);
    assert_eq!(state.route, "sales");

    let lines = harness.log_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "User question: What deals closed this quarter?\nAI Answer: 3 deals closed.\n\n"
    );
}

#[tokio::test(start_paused = true)]
async fn it_prepends_newer_answers() {
    let backend = FakeBackend::answering("Sure.", None);
    let mut harness = Harness::new(backend.clone());

    harness.controller.submit("one");
    harness.run_for(Duration::from_secs(5)).await;
    harness.controller.submit("two");
    harness.run_for(Duration::from_secs(5)).await;

    let questions = harness
        .controller
        .history()
        .iter()
        .map(|entry| return entry.question().to_string())
        .collect::<Vec<String>>();
    assert_eq!(questions, vec!["two", "one"]);
}

#[tokio::test(start_paused = true)]
async fn it_apologizes_on_network_errors() {
    let backend = FakeBackend::new(
        Err(BackendError::Transport("connection refused".to_string())),
        Duration::from_millis(200),
    );
    let mut harness = Harness::new(backend);

    harness.controller.submit("hello");
    let states = harness.run_for(Duration::from_secs(10)).await;

    assert_eq!(states.len(), 2);
    assert_eq!(states[0].status, STATUS_ERROR);
    assert!(!states[0].awaiting_response);
    assert_eq!(states[1].status, "");

    let history = harness.controller.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].question(), "hello");
    assert_eq!(history[0].answer(), APOLOGY_ANSWER);
    assert!(history[0].is_apology());

    let lines = harness.log_lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(
        "ERROR: failed to reach the AI endpoint: connection refused (Context: ai_request)\n"
    ));
}

#[tokio::test(start_paused = true)]
async fn it_stops_without_waiting_for_the_backend() {
    let backend = FakeBackend::answering("too late", Some("sales"));
    let mut harness = Harness::new(backend);

    harness.controller.submit("slow question");
    harness.run_for(Duration::from_millis(500)).await;

    assert!(harness.controller.cancel());
    assert!(!harness.controller.is_awaiting_response());
    assert_eq!(harness.controller.state().status, STATUS_STOPPED);
    assert_eq!(harness.controller.state().question, "");

    let states = harness.run_for(Duration::from_secs(10)).await;
    assert!(harness.controller.history().is_empty());
    assert!(states
        .iter()
        .all(|state| return state.progress == 0 && !state.awaiting_response));
    assert_eq!(harness.controller.state().status, "");
    assert!(harness.log_lines().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_ignores_stop_once_the_answer_arrived() {
    let backend = FakeBackend::answering("3 deals closed.", Some("sales"));
    let mut harness = Harness::new(backend);

    harness.controller.submit("What deals closed this quarter?");
    harness.run_for(Duration::from_millis(1700)).await;
    assert!(harness.controller.is_awaiting_response());
    assert_eq!(harness.controller.state().progress, 20);
    assert_eq!(harness.controller.history().len(), 1);

    assert!(!harness.controller.cancel());
    assert_eq!(
        harness.controller.state().status,
        "Routing to sales data..."
    );

    let states = harness.run_for(Duration::from_secs(10)).await;
    assert!(states.iter().all(|state| return state.status != STATUS_STOPPED));
    assert_eq!(states.last().unwrap().status, "");
    assert!(!harness.controller.is_awaiting_response());
    assert_eq!(harness.controller.history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn it_ignores_stop_when_idle() {
    let backend = FakeBackend::answering("Hi.", None);
    let mut harness = Harness::new(backend);

    assert!(!harness.controller.cancel());
    assert_eq!(harness.controller.state().status, "");
}

#[tokio::test(start_paused = true)]
async fn it_skips_responses_without_an_answer() {
    let backend = FakeBackend::new(
        Ok(AnswerResponse {
            answer: None,
            route_type: Some("general".to_string()),
            processing_time: None,
        }),
        Duration::from_millis(100),
    );
    let mut harness = Harness::new(backend);

    harness.controller.submit("anything?");
    let states = harness.run_for(Duration::from_secs(10)).await;

    assert_eq!(states.len(), 2);
    assert!(!states[0].awaiting_response);
    assert!(harness.controller.history().is_empty());
    assert!(harness.log_lines().is_empty());
}

#[tokio::test(start_paused = true)]
async fn it_clears_everything() {
    let backend = FakeBackend::answering("Sure.", Some("sales"));
    let mut harness = Harness::new(backend.clone());
    let first_session = harness.logger.session_id();

    harness.controller.submit("one");
    harness.run_for(Duration::from_secs(5)).await;
    harness.controller.submit("two");
    harness.run_for(Duration::from_millis(100)).await;

    harness.controller.clear();
    assert!(harness.controller.history().is_empty());
    assert_eq!(harness.controller.state(), &ChatSessionState::default());
    assert_ne!(harness.logger.session_id(), first_session);

    // The stopped request still reports back, but nothing it sends applies.
    let states = harness.run_for(Duration::from_secs(10)).await;
    assert!(states
        .iter()
        .all(|state| return state == &ChatSessionState::default()));
    assert!(harness.controller.history().is_empty());
    assert_eq!(backend.clears.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn it_resubmits_the_last_question() {
    let backend = FakeBackend::answering("Sure.", None);
    let mut harness = Harness::new(backend.clone());

    assert!(!harness.controller.resubmit());

    harness.controller.submit("  again?  ");
    harness.run_for(Duration::from_secs(5)).await;
    assert!(harness.controller.resubmit());
    harness.run_for(Duration::from_secs(5)).await;

    assert_eq!(backend.questions(), vec!["again?", "again?"]);
    assert_eq!(harness.controller.history().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn it_forgets_the_last_question_on_clear() {
    let backend = FakeBackend::answering("Sure.", None);
    let mut harness = Harness::new(backend.clone());

    harness.controller.submit("old conversation");
    harness.run_for(Duration::from_secs(5)).await;
    harness.controller.clear();

    assert!(!harness.controller.resubmit());
    harness.run_for(Duration::from_secs(5)).await;
    assert_eq!(backend.questions(), vec!["old conversation"]);
}

#[tokio::test(start_paused = true)]
async fn it_keeps_answers_as_received() {
    let backend = FakeBackend::answering("col1\tcol2", None);
    let mut harness = Harness::new(backend);

    harness.controller.submit("Show me a table");
    harness.run_for(Duration::from_secs(5)).await;

    assert_eq!(
        harness.controller.history(),
        vec![ConversationEntry::new("Show me a table", "col1\tcol2")]
    );
    assert_eq!(harness.controller.history()[0].answer(), "col1\tcol2");
    assert_eq!(
        harness.log_lines()[1],
        "User question: Show me a table\nAI Answer: col1\tcol2\n\n"
    );
}
