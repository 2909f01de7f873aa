use anyhow::Result;
use chrono::TimeZone;
use chrono::Utc;

use super::LogEvent;
use super::LogFormat;
use super::LogRecord;

fn record(event: LogEvent) -> LogRecord {
    return LogRecord {
        event,
        session_id: "session_1700000000000_abc123def".to_string(),
        timestamp: Utc.with_ymd_and_hms(2023, 11, 2, 10, 0, 0).unwrap(),
    };
}

#[test]
fn it_renders_conversations_as_text() -> Result<()> {
    let res = record(LogEvent::Conversation {
        user_question: "Who closed the most deals?".to_string(),
        ai_answer: "Jane Doe closed 4 deals.".to_string(),
    })
    .render(LogFormat::Text)?;

    assert_eq!(
        res,
        "User question: Who closed the most deals?\nAI Answer: Jane Doe closed 4 deals.\n\n"
    );
    return Ok(());
}

#[test]
fn it_renders_session_starts_as_text() -> Result<()> {
    let res = record(LogEvent::SessionStart).render(LogFormat::Text)?;

    assert!(res.starts_with("\n=== Session Started: "));
    assert!(res.contains("/2023, "));
    assert!(res.ends_with(" ===\n"));
    return Ok(());
}

#[test]
fn it_renders_errors_with_context_as_text() -> Result<()> {
    let res = record(LogEvent::Error {
        error: "connection refused".to_string(),
        context: "ai_request".to_string(),
    })
    .render(LogFormat::Text)?;

    assert!(res.starts_with("ERROR: connection refused (Context: ai_request)\nTimestamp: "));
    assert!(res.contains("/2023, "));
    assert!(res.ends_with("\n\n"));
    return Ok(());
}

#[test]
fn it_renders_errors_without_context_as_text() -> Result<()> {
    let res = record(LogEvent::Error {
        error: "connection refused".to_string(),
        context: "".to_string(),
    })
    .render(LogFormat::Text)?;

    assert!(res.starts_with("ERROR: connection refused\nTimestamp: "));
    return Ok(());
}

#[test]
fn it_renders_conversations_as_json() -> Result<()> {
    let res = record(LogEvent::Conversation {
        user_question: "hello".to_string(),
        ai_answer: "hi".to_string(),
    })
    .render(LogFormat::Json)?;

    let value: serde_json::Value = serde_json::from_str(&res)?;
    assert_eq!(
        value,
        serde_json::json!({
            "type": "conversation",
            "userQuestion": "hello",
            "aiAnswer": "hi",
            "sessionId": "session_1700000000000_abc123def",
            "timestamp": "2023-11-02T10:00:00Z",
        })
    );
    return Ok(());
}

#[test]
fn it_renders_session_starts_as_json() -> Result<()> {
    let res = record(LogEvent::SessionStart).render(LogFormat::Json)?;

    let value: serde_json::Value = serde_json::from_str(&res)?;
    assert_eq!(value["type"], "session_start");
    assert_eq!(value["sessionId"], "session_1700000000000_abc123def");
    return Ok(());
}
