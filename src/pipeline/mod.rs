//! The check pipeline: dedup, concurrent checking, reporting

pub mod checker;
pub mod dedup;
pub mod report;

pub use checker::{CheckOptions, Checker};
pub use dedup::dedupe;
pub use report::summarize;
