//! Expiry classification
//!
//! Pure mapping from a probe outcome to a check result. No I/O; the clock
//! is a parameter so boundary behavior stays deterministic in tests.

use crate::error::ProbeError;
use crate::models::{CheckResult, CheckStatus};
use chrono::{DateTime, Utc};

const SECS_PER_DAY: i64 = 86_400;

/// Whole days between `now` and `expiry`, rounded toward negative
/// infinity. A certificate 12 hours past expiry reports -1, not 0, so the
/// threshold comparison never flips across a midnight boundary.
pub fn days_left(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (expiry - now).num_seconds().div_euclid(SECS_PER_DAY)
}

/// Classify one probe outcome against the threshold.
pub fn classify(
    hostname: &str,
    outcome: Result<DateTime<Utc>, ProbeError>,
    threshold_days: i64,
    now: DateTime<Utc>,
) -> CheckResult {
    match outcome {
        Ok(expiry) => {
            let days = days_left(expiry, now);
            let status = if days < threshold_days {
                CheckStatus::Fail
            } else {
                CheckStatus::Pass
            };
            CheckResult {
                hostname: hostname.to_string(),
                expiry_time: Some(expiry),
                days_left: Some(days),
                status,
                error: None,
            }
        }
        Err(e) => CheckResult::probe_error(hostname, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 15, 30, 0).unwrap()
    }

    #[test]
    fn days_left_floors_toward_negative_infinity() {
        let now = base_now();
        assert_eq!(days_left(now + Duration::seconds(1), now), 0);
        assert_eq!(days_left(now + Duration::seconds(SECS_PER_DAY), now), 1);
        assert_eq!(days_left(now + Duration::seconds(SECS_PER_DAY - 1), now), 0);
        assert_eq!(days_left(now - Duration::seconds(1), now), -1);
        assert_eq!(days_left(now - Duration::hours(12), now), -1);
        assert_eq!(days_left(now, now), 0);
    }

    #[test]
    fn days_left_is_stable_across_a_midnight_boundary() {
        // 23:59:30 local to the expiry's day boundary: still 0 whole days
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 23, 59, 30).unwrap();
        let expiry = Utc.with_ymd_and_hms(2026, 3, 11, 12, 0, 0).unwrap();
        assert_eq!(days_left(expiry, now), 0);
    }

    #[test]
    fn expiry_beyond_threshold_passes() {
        let now = base_now();
        let result = classify("ok.example", Ok(now + Duration::days(90)), 30, now);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.days_left, Some(90));
        assert!(result.error.is_none());
        assert!(result.expiry_time.is_some());
    }

    #[test]
    fn expiry_at_exactly_threshold_days_passes() {
        let now = base_now();
        let result = classify("edge.example", Ok(now + Duration::days(30)), 30, now);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.days_left, Some(30));
    }

    #[test]
    fn expiry_below_threshold_fails() {
        let now = base_now();
        let result = classify("soon.example", Ok(now + Duration::days(5)), 30, now);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.days_left, Some(5));
        assert!(result.error.is_none());
    }

    #[test]
    fn expired_certificate_fails_with_negative_days() {
        let now = base_now();
        let result = classify("old.example", Ok(now - Duration::days(3)), 30, now);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.days_left, Some(-3));
    }

    #[test]
    fn every_probe_error_maps_to_error_status() {
        let now = base_now();
        let errors = [
            ProbeError::ConnectionFailed("refused".to_string()),
            ProbeError::Timeout,
            ProbeError::TlsError("handshake alert".to_string()),
            ProbeError::MalformedCertificate("bad der".to_string()),
        ];

        for error in errors {
            let rendered = error.to_string();
            let result = classify("broken.example", Err(error), 30, now);
            assert_eq!(result.status, CheckStatus::Error);
            assert_eq!(result.error.as_deref(), Some(rendered.as_str()));
            assert!(result.expiry_time.is_none());
            assert!(result.days_left.is_none());
        }
    }
}
