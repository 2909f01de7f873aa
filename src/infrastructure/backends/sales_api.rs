#[cfg(test)]
#[path = "sales_api_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnswerResponse;
use crate::domain::models::Backend;
use crate::domain::models::BackendError;
use crate::domain::models::QuestionRequest;
use crate::domain::models::SalesRep;
use crate::domain::models::SalesRepsResponse;

pub const SESSION_HEADER: &str = "X-Session-ID";

/// Client for the sales team API serving both the rep listing and the AI
/// question endpoint.
pub struct SalesApi {
    url: String,
    session_id: String,
    timeout: Duration,
    health_check_timeout: Duration,
}

impl SalesApi {
    pub fn from_config() -> Result<SalesApi> {
        return Ok(SalesApi {
            url: Config::get(ConfigKey::ApiURL)
                .trim_end_matches('/')
                .to_string(),
            session_id: Config::get(ConfigKey::ApiSessionID),
            timeout: Duration::from_millis(Config::get_millis(ConfigKey::ApiTimeout)?),
            health_check_timeout: Duration::from_millis(Config::get_millis(
                ConfigKey::HealthCheckTimeout,
            )?),
        });
    }
}

fn classify_err(err: reqwest::Error) -> BackendError {
    if err.is_decode() {
        return BackendError::Malformed(err.to_string());
    }

    return BackendError::Transport(err.to_string());
}

#[async_trait]
impl Backend for SalesApi {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(self.health_check_timeout)
            .send()
            .await;

        if let Err(err) = res {
            tracing::error!(error = ?err, "Sales API is not running");
            bail!("Sales API is not running at {}", self.url);
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn ask(&self, question: &str) -> Result<AnswerResponse, BackendError> {
        let req = QuestionRequest {
            question: question.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/api/ai", url = self.url))
            .header(SESSION_HEADER, &self.session_id)
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await
            .map_err(classify_err)?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make question request to the AI endpoint"
            );
            return Err(BackendError::Status(res.status().as_u16()));
        }

        let body = res.text().await.map_err(classify_err)?;
        let answer: AnswerResponse = serde_json::from_str(&body)
            .map_err(|err| return BackendError::Malformed(err.to_string()))?;
        tracing::debug!(body = ?answer, "Question response");

        return Ok(answer);
    }

    #[allow(clippy::implicit_return)]
    async fn list_sales_reps(&self) -> Result<Vec<SalesRep>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/sales-reps", url = self.url))
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to fetch sales reps"
            );
            bail!("Sales reps request failed with status {}", res.status());
        }

        let body = res.json::<SalesRepsResponse>().await?;
        return Ok(body.sales_reps);
    }

    #[allow(clippy::implicit_return)]
    async fn clear_conversation(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .post(format!("{url}/api/conversation/clear", url = self.url))
            .header(SESSION_HEADER, &self.session_id)
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            bail!("Conversation clear failed with status {}", res.status());
        }

        return Ok(());
    }
}
