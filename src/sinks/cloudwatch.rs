//! CloudWatch metric publishing
//!
//! Publishes a `DaysToExpiry` gauge per host under a configurable
//! namespace. Request signing and credential resolution are delegated to
//! the aws CLI, which must be on PATH when this sink is enabled.

use crate::error::SinkError;
use crate::models::CheckResult;
use async_trait::async_trait;
use serde_json::json;
use tokio::process::Command;

use super::Sink;

/// put-metric-data accepts at most 20 entries per call.
const ENTRIES_PER_CALL: usize = 20;

pub struct CloudWatchSink {
    namespace: String,
}

impl CloudWatchSink {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }
}

/// Metric entries for every result with a known expiry, in the
/// put-metric-data JSON shape. Hosts without a readable certificate carry
/// no entry.
pub(crate) fn metric_data(results: &[CheckResult]) -> Vec<serde_json::Value> {
    results
        .iter()
        .filter_map(|result| {
            result.days_left.map(|days| {
                json!({
                    "MetricName": "DaysToExpiry",
                    "Dimensions": [{ "Name": "Host", "Value": result.hostname }],
                    "Value": days,
                    "Unit": "Count"
                })
            })
        })
        .collect()
}

#[async_trait]
impl Sink for CloudWatchSink {
    fn name(&self) -> &str {
        "cloudwatch"
    }

    async fn deliver(&self, results: &[CheckResult]) -> Result<(), SinkError> {
        let entries = metric_data(results);
        for chunk in entries.chunks(ENTRIES_PER_CALL) {
            let payload = serde_json::Value::Array(chunk.to_vec()).to_string();
            let output = Command::new("aws")
                .args([
                    "cloudwatch",
                    "put-metric-data",
                    "--namespace",
                    &self.namespace,
                    "--metric-data",
                    &payload,
                ])
                .output()
                .await
                .map_err(|e| SinkError::Command(e.to_string()))?;

            if !output.status.success() {
                return Err(SinkError::Command(
                    String::from_utf8_lossy(&output.stderr).trim().to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckStatus;
    use chrono::Utc;

    #[test]
    fn one_entry_per_readable_certificate() {
        let results = vec![
            CheckResult {
                hostname: "a.example".to_string(),
                expiry_time: Some(Utc::now()),
                days_left: Some(42),
                status: CheckStatus::Pass,
                error: None,
            },
            CheckResult::probe_error("down.example", "timed out"),
            CheckResult {
                hostname: "b.example".to_string(),
                expiry_time: Some(Utc::now()),
                days_left: Some(-2),
                status: CheckStatus::Fail,
                error: None,
            },
        ];

        let entries = metric_data(&results);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["MetricName"], "DaysToExpiry");
        assert_eq!(entries[0]["Dimensions"][0]["Value"], "a.example");
        assert_eq!(entries[0]["Value"], 42);
        assert_eq!(entries[1]["Dimensions"][0]["Value"], "b.example");
        assert_eq!(entries[1]["Value"], -2);
    }

    #[test]
    fn unreadable_hosts_produce_no_entries() {
        let results = vec![CheckResult::probe_error("down.example", "refused")];
        assert!(metric_data(&results).is_empty());
    }
}
