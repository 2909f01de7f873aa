use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::LogFormat;

#[async_trait]
pub trait LogSink {
    /// The record format lines passed to `append` are rendered in.
    fn format(&self) -> LogFormat {
        return LogFormat::Text;
    }

    /// Appends one rendered log line. Sinks are write only and never read
    /// back.
    async fn append(&self, line: &str) -> Result<()>;
}

pub type LogSinkBox = Arc<dyn LogSink + Send + Sync>;
