//! Jira ticket alerting

use crate::error::SinkError;
use crate::models::CheckResult;
use async_trait::async_trait;
use serde_json::json;

use super::Sink;

/// Creates one issue per run summarizing all failing certificates. Silent
/// when nothing fails.
pub struct JiraSink {
    /// Issue-creation endpoint, e.g.
    /// `https://example.atlassian.net/rest/api/2/issue`.
    issue_url: String,
    /// Base64-encoded `user:token`.
    auth_basic: String,
    project_key: String,
    client: reqwest::Client,
}

impl JiraSink {
    pub fn new(
        issue_url: impl Into<String>,
        auth_basic: impl Into<String>,
        project_key: impl Into<String>,
    ) -> Self {
        Self {
            issue_url: issue_url.into(),
            auth_basic: auth_basic.into(),
            project_key: project_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Sink for JiraSink {
    fn name(&self) -> &str {
        "jira"
    }

    async fn deliver(&self, results: &[CheckResult]) -> Result<(), SinkError> {
        let failing = super::failing(results);
        if failing.is_empty() {
            return Ok(());
        }

        let payload = json!({
            "fields": {
                "project": { "key": self.project_key },
                "summary": format!("SSL Certificate Expiry: {} host(s)", failing.len()),
                "description": super::failure_lines(&failing),
                "issuetype": { "name": "Bug" },
                "priority": { "name": "High" }
            }
        });

        let response = self
            .client
            .post(&self.issue_url)
            .header("Authorization", format!("Basic {}", self.auth_basic))
            .json(&payload)
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
