//! Prometheus pushgateway metrics
//!
//! Pushes a `ssl_cert_days_remaining` gauge per host in the text
//! exposition format. Hosts without a readable certificate carry no
//! gauge sample.

use crate::error::SinkError;
use crate::models::CheckResult;
use async_trait::async_trait;

use super::Sink;

pub struct PushgatewaySink {
    base_url: String,
    job: String,
    client: reqwest::Client,
}

impl PushgatewaySink {
    pub fn new(base_url: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            job: job.into(),
            client: reqwest::Client::new(),
        }
    }
}

/// Escape a label value per the text exposition format: backslash, double
/// quote and newline must be escaped inside quoted label values.
fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render the gauge samples for every result with a known expiry.
pub(crate) fn render_metrics(results: &[CheckResult]) -> String {
    let mut body = String::new();
    body.push_str("# TYPE ssl_cert_days_remaining gauge\n");
    for result in results {
        if let Some(days) = result.days_left {
            body.push_str(&format!(
                "ssl_cert_days_remaining{{host=\"{}\"}} {days}\n",
                escape_label(&result.hostname)
            ));
        }
    }
    body
}

#[async_trait]
impl Sink for PushgatewaySink {
    fn name(&self) -> &str {
        "pushgateway"
    }

    async fn deliver(&self, results: &[CheckResult]) -> Result<(), SinkError> {
        if results.iter().all(|r| r.days_left.is_none()) {
            return Ok(());
        }

        let url = format!(
            "{}/metrics/job/{}",
            self.base_url.trim_end_matches('/'),
            self.job
        );

        let response = self
            .client
            .post(&url)
            .body(render_metrics(results))
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
