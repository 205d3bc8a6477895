//! Slack webhook alerting

use crate::error::SinkError;
use crate::models::CheckResult;
use async_trait::async_trait;
use serde_json::json;

use super::Sink;

/// Posts one message per run enumerating failing certificates. Silent when
/// nothing fails.
pub struct SlackSink {
    webhook_url: String,
    client: reqwest::Client,
}

impl SlackSink {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Sink for SlackSink {
    fn name(&self) -> &str {
        "slack"
    }

    async fn deliver(&self, results: &[CheckResult]) -> Result<(), SinkError> {
        let failing = super::failing(results);
        if failing.is_empty() {
            return Ok(());
        }

        let message = format!(
            "*SSL Cert Expiry Alert:*\n{}",
            super::failure_lines(&failing)
        );

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "text": message }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SinkError::Rejected {
                status: response.status().as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}
