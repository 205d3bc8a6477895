//! Result summarization
//!
//! Turns a completed result set into a human-readable summary and an
//! exit-status decision. Pure: the caller decides where the text goes.

use crate::models::{CheckResult, CheckStatus};

/// Summarize `results` and decide the process exit code.
///
/// The exit code is 1 when any result is FAIL or ERROR and the
/// fail-on-expiry policy is enabled, 0 otherwise. Listings follow result
/// order.
pub fn summarize(results: &[CheckResult], fail_on_expiry: bool) -> (String, i32) {
    let total = results.len();
    let pass = results.iter().filter(|r| r.status == CheckStatus::Pass).count();
    let fail = results.iter().filter(|r| r.status == CheckStatus::Fail).count();
    let error = results.iter().filter(|r| r.status == CheckStatus::Error).count();

    let mut text = String::new();
    text.push_str("SSL Certificate Check Report\n");
    text.push_str(&format!("Total certificates checked: {total}\n"));
    text.push_str(&format!("Passing: {pass}\n"));
    text.push_str(&format!("Failing: {fail}\n"));
    text.push_str(&format!("Errors: {error}\n"));

    if fail > 0 {
        text.push_str("\nFailing certificates:\n");
        for result in results.iter().filter(|r| r.status == CheckStatus::Fail) {
            text.push_str(&format!(
                "  - {}: {} days remaining\n",
                result.hostname,
                result.days_left.unwrap_or_default()
            ));
        }
    }

    if error > 0 {
        text.push_str("\nUnreachable or unreadable hosts:\n");
        for result in results.iter().filter(|r| r.status == CheckStatus::Error) {
            text.push_str(&format!(
                "  - {}: {}\n",
                result.hostname,
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    let unhealthy = fail + error > 0;
    let exit_code = if unhealthy && fail_on_expiry { 1 } else { 0 };

    (text, exit_code)
}
