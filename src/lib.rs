//! certsweep library
//!
//! Discovers TLS-terminating hostnames across infrastructure providers,
//! probes each host's live certificate under bounded time, classifies the
//! remaining validity against a threshold, and routes results to
//! monitoring and alerting sinks.
//!
//! The check pipeline is the core: [`pipeline::Checker`] deduplicates a
//! provider-tagged hostname list, drives one concurrent probe per unique
//! host, and returns a result set in deterministic submission order even
//! under partial failure.

pub mod checks;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod runner;
pub mod sinks;

// Re-export commonly used types
pub use config::PipelineConfig;
pub use error::{Result, SweepError};
pub use models::{CheckResult, CheckStatus, Domain, Provider};
pub use runner::Pipeline;
