//! Provider discovery adapters
//!
//! Each adapter enumerates TLS hostnames from one infrastructure provider.
//! The pipeline treats adapters as isolated collaborators: a failing or
//! misbehaving adapter contributes zero domains, never a failed run.

use crate::error::AdapterError;
use crate::models::{Domain, Provider};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::process::Command;

/// Capability seam for hostname discovery, so the pipeline stays agnostic
/// to how discovery is implemented (subprocess, in-process, remote call).
#[async_trait]
pub trait DiscoveryAdapter: Send + Sync {
    /// Adapter name for logging.
    fn name(&self) -> &str;

    /// Enumerate domains from this provider.
    async fn run(&self) -> Result<Vec<Domain>, AdapterError>;
}

/// Adapter that shells out to a per-provider discovery command. The
/// command must print a JSON array of domain records (or bare hostname
/// strings) on stdout and exit 0.
pub struct CommandAdapter {
    provider: Provider,
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandAdapter {
    /// `command` is whitespace-split into program and arguments.
    pub fn new(provider: Provider, command: &str, timeout: Duration) -> Self {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            provider,
            program,
            args: parts.collect(),
            timeout,
        }
    }
}

#[async_trait]
impl DiscoveryAdapter for CommandAdapter {
    fn name(&self) -> &str {
        self.provider.as_str()
    }

    async fn run(&self) -> Result<Vec<Domain>, AdapterError> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program).args(&self.args).output(),
        )
        .await
        .map_err(|_| AdapterError::Timeout {
            name: self.name().to_string(),
        })?
        .map_err(|e| AdapterError::Spawn {
            name: self.name().to_string(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(AdapterError::NonZeroExit {
                name: self.name().to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_domains(self.provider, stdout.trim())
    }
}

/// Normalize adapter output into domain records.
///
/// Accepts a JSON array whose elements are either objects with a
/// `hostname` field or bare hostname strings. Other string-valued object
/// fields are kept as provenance; non-conforming array elements are
/// skipped.
pub fn parse_domains(provider: Provider, raw: &str) -> Result<Vec<Domain>, AdapterError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| AdapterError::InvalidOutput {
        name: provider.as_str().to_string(),
        message: e.to_string(),
    })?;

    let Value::Array(items) = value else {
        return Err(AdapterError::InvalidOutput {
            name: provider.as_str().to_string(),
            message: "expected a JSON array".to_string(),
        });
    };

    let mut domains = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(hostname) => domains.push(Domain::new(hostname, provider)),
            Value::Object(map) => {
                let hostname = map
                    .get("hostname")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let mut provenance = BTreeMap::new();
                for (key, val) in &map {
                    if key == "hostname" {
                        continue;
                    }
                    if let Some(s) = val.as_str() {
                        provenance.insert(key.clone(), s.to_string());
                    }
                }
                domains.push(Domain {
                    hostname,
                    source: provider,
                    provenance,
                });
            }
            other => {
                tracing::debug!(provider = provider.as_str(), ?other, "skipping non-domain entry");
            }
        }
    }

    Ok(domains)
}

/// Run every adapter in order, tolerating individual failures.
pub async fn discover_all(adapters: &[Box<dyn DiscoveryAdapter>]) -> Vec<Domain> {
    let mut all = Vec::new();
    for adapter in adapters {
        match adapter.run().await {
            Ok(domains) => {
                tracing::info!(
                    provider = adapter.name(),
                    count = domains.len(),
                    "discovery finished"
                );
                all.extend(domains);
            }
            Err(e) => {
                tracing::warn!(
                    provider = adapter.name(),
                    error = %e,
                    "discovery failed, treating as zero domains"
                );
            }
        }
    }
    all
}
