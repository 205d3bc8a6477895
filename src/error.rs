//! Error types for certsweep
//!
//! Probe-level and adapter-level failures are recoverable: they are folded
//! into ERROR-status check results or zero-domain discovery, never raised
//! past the pipeline. Configuration errors are fatal and reported before
//! any network activity.

use thiserror::Error;

/// Failures from probing a single host's certificate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("timed out")]
    Timeout,

    #[error("TLS error: {0}")]
    TlsError(String),

    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),
}

/// Failures from a discovery adapter subprocess.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("adapter '{name}' failed to spawn: {message}")]
    Spawn { name: String, message: String },

    #[error("adapter '{name}' timed out")]
    Timeout { name: String },

    #[error("adapter '{name}' exited with {code:?}: {stderr}")]
    NonZeroExit {
        name: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("adapter '{name}' produced unparsable output: {message}")]
    InvalidOutput { name: String, message: String },
}

/// Failures delivering results to a monitoring or alerting sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sink rejected payload with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("command failed: {0}")]
    Command(String),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("missing required configuration: {key}")]
    MissingRequired { key: String },
}

/// Top-level error type for the certsweep application.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias using SweepError
pub type Result<T> = std::result::Result<T, SweepError>;
