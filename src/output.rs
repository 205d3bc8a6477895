//! Terminal output helpers
//!
//! stdout carries the machine-readable result lines; styled human output
//! goes to stderr.

use crate::error::Result;
use crate::models::{CheckResult, CheckStatus};
use console::style;

/// Print one serialized check result per line, in the same line format
/// the sinks consume.
pub fn print_result_lines(results: &[CheckResult]) -> Result<()> {
    for result in results {
        println!("{}", serde_json::to_string(result)?);
    }
    Ok(())
}

/// Styled per-host status lines for humans.
pub fn print_status_lines(results: &[CheckResult]) {
    for result in results {
        let status = match result.status {
            CheckStatus::Pass => style("✓ PASS").green().to_string(),
            CheckStatus::Fail => style("! FAIL").yellow().bold().to_string(),
            CheckStatus::Error => style("✗ ERROR").red().to_string(),
        };

        let detail = match (result.days_left, &result.error) {
            (Some(days), _) => format!("({days} days)"),
            (None, Some(error)) => format!("- {error}"),
            (None, None) => String::new(),
        };

        eprintln!(
            "  {} {} {}",
            status,
            style(&result.hostname).bold(),
            style(&detail).dim()
        );
    }
}
