use anyhow::Result;

use super::NoopSink;
use crate::domain::models::LogFormat;
use crate::domain::models::LogSink;

#[tokio::test]
async fn it_discards_records() -> Result<()> {
    let sink = NoopSink::default();
    assert_eq!(sink.format(), LogFormat::Text);
    sink.append("User question: hello\n").await?;
    return Ok(());
}
