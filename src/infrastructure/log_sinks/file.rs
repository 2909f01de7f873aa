#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::models::LogFormat;
use crate::domain::models::LogSink;

pub const LOG_HEADER: &str = "=== Conversation Log Started ===\n";

/// Appends human readable records to a text file.
pub struct FileSink {
    file_path: path::PathBuf,
    // Serializes appends so records never interleave.
    lock: Mutex<()>,
}

impl FileSink {
    pub fn new(file_path: path::PathBuf) -> FileSink {
        return FileSink {
            file_path,
            lock: Mutex::new(()),
        };
    }
}

#[async_trait]
impl LogSink for FileSink {
    fn format(&self) -> LogFormat {
        return LogFormat::Text;
    }

    #[allow(clippy::implicit_return)]
    async fn append(&self, line: &str) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut payload = line.to_string();
        if !self.file_path.exists() {
            if let Some(parent) = self.file_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            payload = format!("{LOG_HEADER}{line}");
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
            .await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;

        return Ok(());
    }
}
