use tui_textarea::Input;

use super::AnswerResponse;
use super::BackendError;
use super::ProgressStage;
use super::SalesRep;

/// Completions delivered to the chat controller. Every variant carries the
/// request generation that produced it.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatEvent {
    AnswerReceived {
        request_id: u64,
        result: Result<AnswerResponse, BackendError>,
    },
    ProgressStage {
        request_id: u64,
        stage: ProgressStage,
    },
    ProgressSettled {
        request_id: u64,
    },
    StatusCleared {
        request_id: u64,
    },
}

impl ChatEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            ChatEvent::AnswerReceived { request_id, .. } => return *request_id,
            ChatEvent::ProgressStage { request_id, .. } => return *request_id,
            ChatEvent::ProgressSettled { request_id } => return *request_id,
            ChatEvent::StatusCleared { request_id } => return *request_id,
        }
    }
}

pub enum Event {
    Chat(ChatEvent),
    SalesRepsLoaded(Result<Vec<SalesRep>, String>),
    KeyboardCharInput(Input),
    KeyboardCTRLB(),
    KeyboardCTRLC(),
    KeyboardCTRLL(),
    KeyboardCTRLR(),
    KeyboardCTRLS(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardPaste(String),
    KeyboardTab(),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
