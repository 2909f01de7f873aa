#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::LogSink;

#[derive(Default)]
pub struct NoopSink {}

#[async_trait]
impl LogSink for NoopSink {
    #[allow(clippy::implicit_return)]
    async fn append(&self, _line: &str) -> Result<()> {
        return Ok(());
    }
}
