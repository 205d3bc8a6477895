//! Pipeline configuration
//!
//! An explicit configuration struct passed by value into the runner, with
//! no process-wide state. Values come from defaults, then an optional TOML
//! file, then environment variable overrides, and are validated before
//! any probing begins.

use crate::error::ConfigError;
use crate::models::Provider;
use crate::pipeline::checker::CheckOptions;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Discovery providers to run, in order.
    pub providers: Vec<Provider>,
    /// Days-remaining threshold below which a certificate fails.
    pub threshold_days: i64,
    /// Per-host connection + handshake timeout.
    pub check_timeout_secs: u64,
    /// Wall-clock budget for the whole check batch.
    pub batch_timeout_secs: u64,
    /// Bounded worker pool size for concurrent probes.
    pub check_concurrency: usize,
    pub port: u16,
    /// When false, FAIL/ERROR results still report but the exit code
    /// stays 0.
    pub fail_on_expiry: bool,
    /// Newline-delimited JSON results file consumed by the sinks.
    pub results_file: String,
    pub discovery_timeout_secs: u64,
    /// Per-provider discovery command overrides, keyed by provider name.
    pub discovery_commands: BTreeMap<String, String>,
    pub prometheus_pushgateway: Option<String>,
    pub pushgateway_job: String,
    /// CloudWatch metric namespace; the CloudWatch sink runs only when
    /// this is set.
    pub cloudwatch_namespace: Option<String>,
    pub slack_webhook_url: Option<String>,
    /// Jira issue-creation endpoint.
    pub jira_url: Option<String>,
    /// Base64-encoded `user:token`.
    pub jira_auth_basic: Option<String>,
    pub jira_project_key: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            providers: vec![Provider::K8s, Provider::Tf],
            threshold_days: 30,
            check_timeout_secs: 10,
            batch_timeout_secs: 300,
            check_concurrency: 16,
            port: 443,
            fail_on_expiry: true,
            results_file: "cert-results.json".to_string(),
            discovery_timeout_secs: 60,
            discovery_commands: BTreeMap::new(),
            prometheus_pushgateway: None,
            pushgateway_job: "ssl_cert_checker".to_string(),
            cloudwatch_namespace: None,
            slack_webhook_url: None,
            jira_url: None,
            jira_auth_basic: None,
            jira_project_key: "CERT".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load, apply environment overrides and validate. Any error here
    /// aborts the pipeline before discovery or probing starts.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::load_from_file(p)?,
            None => Self::default(),
        };
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var("SSL_PROVIDERS") {
            let mut providers = Vec::new();
            for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
                let provider = part.parse().map_err(|message| ConfigError::InvalidValue {
                    key: "SSL_PROVIDERS".to_string(),
                    message,
                })?;
                providers.push(provider);
            }
            self.providers = providers;
        }

        apply_parsed(&mut self.threshold_days, "SSL_THRESHOLD_DAYS")?;
        apply_parsed(&mut self.check_timeout_secs, "SSL_CHECK_TIMEOUT")?;
        apply_parsed(&mut self.batch_timeout_secs, "SSL_BATCH_TIMEOUT")?;
        apply_parsed(&mut self.check_concurrency, "SSL_CHECK_CONCURRENCY")?;
        apply_parsed(&mut self.port, "SSL_CHECK_PORT")?;

        if let Ok(raw) = std::env::var("FAIL_ON_EXPIRY") {
            self.fail_on_expiry = raw.to_ascii_lowercase() == "true";
        }
        if let Ok(raw) = std::env::var("SSL_RESULTS_FILE") {
            self.results_file = raw;
        }
        if let Ok(raw) = std::env::var("PROMETHEUS_PUSHGATEWAY") {
            self.prometheus_pushgateway = Some(raw);
        }
        if let Ok(raw) = std::env::var("CLOUDWATCH_NAMESPACE") {
            self.cloudwatch_namespace = Some(raw);
        }
        if let Ok(raw) = std::env::var("SLACK_WEBHOOK_URL") {
            self.slack_webhook_url = Some(raw);
        }
        if let Ok(raw) = std::env::var("JIRA_URL") {
            self.jira_url = Some(raw);
        }
        if let Ok(raw) = std::env::var("JIRA_AUTH_BASIC") {
            self.jira_auth_basic = Some(raw);
        }
        if let Ok(raw) = std::env::var("JIRA_PROJECT_KEY") {
            self.jira_project_key = raw;
        }

        for provider in Provider::DISCOVERY {
            let key = format!(
                "SSL_DISCOVERY_CMD_{}",
                provider.as_str().to_ascii_uppercase()
            );
            if let Ok(raw) = std::env::var(&key) {
                self.discovery_commands
                    .insert(provider.as_str().to_string(), raw);
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "providers".to_string(),
            });
        }
        if self.providers.contains(&Provider::Manual) {
            return Err(ConfigError::InvalidValue {
                key: "providers".to_string(),
                message: "'manual' is not a discovery provider".to_string(),
            });
        }
        if self.threshold_days < 0 {
            return Err(ConfigError::InvalidValue {
                key: "threshold_days".to_string(),
                message: "must be non-negative".to_string(),
            });
        }
        if self.check_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "check_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.batch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.check_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "check_concurrency".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.jira_url.is_some() && self.jira_auth_basic.is_none() {
            return Err(ConfigError::MissingRequired {
                key: "jira_auth_basic".to_string(),
            });
        }
        for key in self.discovery_commands.keys() {
            key.parse::<Provider>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "discovery_commands".to_string(),
                    message,
                })?;
        }
        Ok(())
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_secs)
    }

    pub fn batch_timeout(&self) -> Duration {
        Duration::from_secs(self.batch_timeout_secs)
    }

    pub fn discovery_timeout(&self) -> Duration {
        Duration::from_secs(self.discovery_timeout_secs)
    }

    /// Discovery command for a provider, defaulting to the conventional
    /// adapter path.
    pub fn discovery_command_for(&self, provider: Provider) -> String {
        self.discovery_commands
            .get(provider.as_str())
            .cloned()
            .unwrap_or_else(|| format!("scripts/discovery/discover_{provider}"))
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            threshold_days: self.threshold_days,
            port: self.port,
            per_host_timeout: self.check_timeout(),
            global_budget: self.batch_timeout(),
            concurrency: self.check_concurrency,
        }
    }
}

fn apply_parsed<T>(slot: &mut T, key: &str) -> Result<(), ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(raw) = std::env::var(key) {
        *slot = raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}
