#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::domain::models::LogFormat;
use crate::domain::models::LogSink;

/// Posts JSON records to the log-conversation endpoint.
pub struct HttpSink {
    url: String,
    timeout: Duration,
}

impl HttpSink {
    pub fn new(url: &str, timeout: Duration) -> HttpSink {
        return HttpSink {
            url: url.to_string(),
            timeout,
        };
    }
}

#[async_trait]
impl LogSink for HttpSink {
    fn format(&self) -> LogFormat {
        return LogFormat::Json;
    }

    #[allow(clippy::implicit_return)]
    async fn append(&self, line: &str) -> Result<()> {
        let res = reqwest::Client::new()
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .body(line.to_string())
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to deliver log record"
            );
            bail!("Log endpoint responded with status {}", res.status().as_u16());
        }

        return Ok(());
    }
}
