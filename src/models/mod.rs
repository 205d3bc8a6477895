//! Data models for discovered domains and check results

mod check_result;
mod domain;

pub use check_result::{CheckResult, CheckStatus};
pub use domain::{Domain, Provider};
