#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use thiserror::Error;

use super::SalesRep;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub route_type: Option<String>,
    #[serde(default)]
    pub processing_time: Option<f64>,
}

impl AnswerResponse {
    pub fn new(answer: &str, route_type: Option<&str>) -> AnswerResponse {
        return AnswerResponse {
            answer: Some(answer.to_string()),
            route_type: route_type.map(|route| return route.to_string()),
            processing_time: None,
        };
    }
}

/// Failures of a question round trip, classified so cancellation can be told
/// apart from everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("request was cancelled")]
    Cancelled,
    #[error("failed to reach the AI endpoint: {0}")]
    Transport(String),
    #[error("AI endpoint responded with status {0}")]
    Status(u16),
    #[error("AI endpoint returned a malformed body: {0}")]
    Malformed(String),
}

impl BackendError {
    pub fn is_cancellation(&self) -> bool {
        return *self == BackendError::Cancelled;
    }
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the API is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Posts a single question to the AI endpoint. The call is made exactly
    /// once; there is no retry.
    async fn ask(&self, question: &str) -> Result<AnswerResponse, BackendError>;

    /// Fetches every sales rep from the listing endpoint.
    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>>;

    /// Asks the API to forget the conversation memory kept for our session.
    async fn clear_conversation(&self) -> Result<()>;
}

pub type BackendBox = Arc<dyn Backend + Send + Sync>;
