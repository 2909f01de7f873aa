use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use mockito::Matcher;

use super::HttpSink;
use crate::domain::models::LogFormat;
use crate::domain::models::LogSink;
use crate::domain::services::ConversationLogger;

#[tokio::test]
async fn it_posts_records() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/log-conversation")
        .match_header("content-type", "application/json")
        .match_body(Matcher::JsonString(r#"{"type":"session_start"}"#.to_string()))
        .with_status(200)
        .create_async()
        .await;

    let sink = HttpSink::new(
        &format!("{}/api/log-conversation", server.url()),
        Duration::from_millis(500),
    );
    assert_eq!(sink.format(), LogFormat::Json);
    sink.append(r#"{"type":"session_start"}"#).await?;

    mock.assert_async().await;
    return Ok(());
}

#[tokio::test]
async fn it_fails_on_rejections() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/log-conversation")
        .with_status(400)
        .create_async()
        .await;

    let sink = HttpSink::new(
        &format!("{}/api/log-conversation", server.url()),
        Duration::from_millis(500),
    );
    let err = sink.append("{}").await.unwrap_err();

    insta::assert_snapshot!(err.to_string(), @"Log endpoint responded with status 400");
    mock.assert_async().await;
}

#[tokio::test]
async fn it_sends_conversations_as_json() {
    let mut server = mockito::Server::new_async().await;
    let start_mock = server
        .mock("POST", "/api/log-conversation")
        .match_body(Matcher::PartialJsonString(
            r#"{"type":"session_start"}"#.to_string(),
        ))
        .with_status(200)
        .create_async()
        .await;
    let conversation_mock = server
        .mock("POST", "/api/log-conversation")
        .match_body(Matcher::PartialJsonString(
            r#"{"type":"conversation","userQuestion":"hello","aiAnswer":"hi"}"#.to_string(),
        ))
        .with_status(200)
        .create_async()
        .await;

    let sink = HttpSink::new(
        &format!("{}/api/log-conversation", server.url()),
        Duration::from_millis(500),
    );
    let logger = ConversationLogger::new(Arc::new(sink));
    logger.log_conversation("hello", "hi").await;

    start_mock.assert_async().await;
    conversation_mock.assert_async().await;
}
