//! Check result records emitted by the pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome classification for one hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
    Error,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "PASS"),
            CheckStatus::Fail => write!(f, "FAIL"),
            CheckStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// One per unique hostname submitted to the checker, immutable once
/// produced.
///
/// Field invariants:
/// - `status == Error` iff `expiry_time` is absent iff `error` is present
/// - `status == Fail` iff the certificate was read and `days_left` is
///   below the configured threshold
/// - `status == Pass` otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// Build an ERROR-status result for a host whose certificate could not
    /// be read.
    pub fn probe_error(hostname: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            expiry_time: None,
            days_left: None,
            status: CheckStatus::Error,
            error: Some(message.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_as_one_flat_json_object() {
        let result = CheckResult {
            hostname: "web.example.com".to_string(),
            expiry_time: Some(Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap()),
            days_left: Some(91),
            status: CheckStatus::Pass,
            error: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hostname"], "web.example.com");
        assert_eq!(json["status"], "PASS");
        assert_eq!(json["days_left"], 91);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_results_carry_no_expiry_fields() {
        let result = CheckResult::probe_error("down.example.com", "timed out");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "ERROR");
        assert_eq!(json["error"], "timed out");
        assert!(json.get("expiry_time").is_none());
        assert!(json.get("days_left").is_none());
    }
}
