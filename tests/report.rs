use certsweep::models::{CheckResult, CheckStatus};
use certsweep::pipeline::report::summarize;
use chrono::{Duration, Utc};

fn result(hostname: &str, days: i64, status: CheckStatus) -> CheckResult {
    CheckResult {
        hostname: hostname.to_string(),
        expiry_time: Some(Utc::now() + Duration::days(days)),
        days_left: Some(days),
        status,
        error: None,
    }
}

#[test]
fn summarize_counts_every_status() {
    let results = vec![
        result("a.example", 90, CheckStatus::Pass),
        result("b.example", 3, CheckStatus::Fail),
        CheckResult::probe_error("c.example", "timed out"),
    ];

    let (text, exit_code) = summarize(&results, true);
    assert!(text.contains("Total certificates checked: 3"));
    assert!(text.contains("Passing: 1"));
    assert!(text.contains("Failing: 1"));
    assert!(text.contains("Errors: 1"));
    assert!(text.contains("b.example: 3 days remaining"));
    assert!(text.contains("c.example: timed out"));
    assert_eq!(exit_code, 1);
}

#[test]
fn summarize_is_idempotent() {
    let results = vec![
        result("a.example", 2, CheckStatus::Fail),
        result("b.example", 45, CheckStatus::Pass),
    ];

    let first = summarize(&results, true);
    let second = summarize(&results, true);
    assert_eq!(first, second);
}

#[test]
fn failing_list_follows_result_order() {
    let results = vec![
        result("z.example", 9, CheckStatus::Fail),
        result("a.example", 1, CheckStatus::Fail),
    ];

    let (text, _) = summarize(&results, true);
    let z_pos = text.find("z.example").unwrap();
    let a_pos = text.find("a.example").unwrap();
    assert!(z_pos < a_pos);
}

#[test]
fn disabled_fail_on_expiry_reports_but_exits_zero() {
    let results = vec![
        result("a.example", 1, CheckStatus::Fail),
        CheckResult::probe_error("b.example", "refused"),
    ];

    let (text, exit_code) = summarize(&results, false);
    assert_eq!(exit_code, 0);
    assert!(text.contains("Failing: 1"));
}

#[test]
fn all_passing_exits_zero() {
    let results = vec![
        result("a.example", 90, CheckStatus::Pass),
        result("b.example", 31, CheckStatus::Pass),
    ];

    let (text, exit_code) = summarize(&results, true);
    assert_eq!(exit_code, 0);
    assert!(!text.contains("Failing certificates"));
}

#[test]
fn empty_result_set_reports_zero_totals() {
    let (text, exit_code) = summarize(&[], true);
    assert!(text.contains("Total certificates checked: 0"));
    assert_eq!(exit_code, 0);
}

#[test]
fn error_only_batch_is_unhealthy() {
    let results = vec![CheckResult::probe_error("down.example", "batch timeout")];
    let (_, exit_code) = summarize(&results, true);
    assert_eq!(exit_code, 1);
}
