//! Monitoring and alerting sinks
//!
//! Sinks consume a completed result set after the results file has been
//! written. Sink failures are logged and swallowed; they never change the
//! pipeline's exit code.

pub mod cloudwatch;
pub mod jira;
pub mod pushgateway;
pub mod slack;

use crate::error::SinkError;
use crate::models::{CheckResult, CheckStatus};
use async_trait::async_trait;

pub use cloudwatch::CloudWatchSink;
pub use jira::JiraSink;
pub use pushgateway::PushgatewaySink;
pub use slack::SlackSink;

/// One outbound destination for check results.
#[async_trait]
pub trait Sink: Send + Sync {
    /// Sink name for logging.
    fn name(&self) -> &str;

    async fn deliver(&self, results: &[CheckResult]) -> Result<(), SinkError>;
}

/// Deliver to every sink, isolating failures per sink.
pub async fn deliver_all(sinks: &[Box<dyn Sink>], results: &[CheckResult]) {
    for sink in sinks {
        match sink.deliver(results).await {
            Ok(()) => tracing::info!(sink = sink.name(), "sink delivered"),
            Err(e) => tracing::warn!(sink = sink.name(), error = %e, "sink delivery failed"),
        }
    }
}

pub(crate) fn failing(results: &[CheckResult]) -> Vec<&CheckResult> {
    results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .collect()
}

/// "host expires in N days" lines for alert bodies, in result order.
pub(crate) fn failure_lines(failing: &[&CheckResult]) -> String {
    failing
        .iter()
        .map(|r| {
            format!(
                "{} expires in {} days",
                r.hostname,
                r.days_left.unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckResult;
    use chrono::Utc;

    fn fail(hostname: &str, days: i64) -> CheckResult {
        CheckResult {
            hostname: hostname.to_string(),
            expiry_time: Some(Utc::now()),
            days_left: Some(days),
            status: CheckStatus::Fail,
            error: None,
        }
    }

    #[test]
    fn failure_lines_follow_result_order() {
        let results = vec![fail("b.example", 5), fail("a.example", 2)];
        let failing = failing(&results);
        assert_eq!(
            failure_lines(&failing),
            "b.example expires in 5 days\na.example expires in 2 days"
        );
    }

    #[test]
    fn error_results_are_not_alertable_failures() {
        let results = vec![CheckResult::probe_error("down.example", "timed out")];
        assert!(failing(&results).is_empty());
    }
}
