//! Full pipeline orchestration
//!
//! Discovery → dedup + check → results file → sinks → summary. Discovery
//! and sink failures are isolated; only configuration problems (handled
//! before construction) or IO on the results file can fail the run.

use crate::checks::probe::TlsProber;
use crate::config::PipelineConfig;
use crate::discovery::{self, CommandAdapter, DiscoveryAdapter};
use crate::error::Result;
use crate::models::CheckResult;
use crate::pipeline::checker::Checker;
use crate::pipeline::report::summarize;
use crate::sinks::{self, CloudWatchSink, JiraSink, PushgatewaySink, Sink, SlackSink};
use std::io::Write;
use std::sync::Arc;

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// The config must already be validated; see [`PipelineConfig::load`].
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline and return the process exit code.
    pub async fn run(&self) -> Result<i32> {
        tracing::info!(
            providers = ?self.config.providers,
            threshold_days = self.config.threshold_days,
            "starting certificate sweep"
        );

        let adapters = self.adapters();
        let domains = discovery::discover_all(&adapters).await;
        if domains.is_empty() {
            tracing::warn!("no domains discovered");
            return Ok(0);
        }
        tracing::info!(count = domains.len(), "discovery complete");

        let checker = Checker::new(Arc::new(TlsProber::new()));
        let results = checker.run(domains, &self.config.check_options()).await;

        // Sinks consume the results file; it must be fully written before
        // any of them run
        self.write_results(&results)?;
        sinks::deliver_all(&self.monitoring_sinks(), &results).await;
        sinks::deliver_all(&self.alert_sinks(), &results).await;

        let (summary, exit_code) = summarize(&results, self.config.fail_on_expiry);
        println!("{summary}");

        Ok(exit_code)
    }

    fn adapters(&self) -> Vec<Box<dyn DiscoveryAdapter>> {
        self.config
            .providers
            .iter()
            .map(|&provider| {
                Box::new(CommandAdapter::new(
                    provider,
                    &self.config.discovery_command_for(provider),
                    self.config.discovery_timeout(),
                )) as Box<dyn DiscoveryAdapter>
            })
            .collect()
    }

    fn monitoring_sinks(&self) -> Vec<Box<dyn Sink>> {
        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        if let Some(url) = &self.config.prometheus_pushgateway {
            sinks.push(Box::new(PushgatewaySink::new(
                url,
                &self.config.pushgateway_job,
            )));
        }
        if let Some(namespace) = &self.config.cloudwatch_namespace {
            sinks.push(Box::new(CloudWatchSink::new(namespace)));
        }
        sinks
    }

    fn alert_sinks(&self) -> Vec<Box<dyn Sink>> {
        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        if let Some(url) = &self.config.slack_webhook_url {
            sinks.push(Box::new(SlackSink::new(url)));
        }
        if let (Some(url), Some(auth)) = (&self.config.jira_url, &self.config.jira_auth_basic) {
            sinks.push(Box::new(JiraSink::new(
                url,
                auth,
                &self.config.jira_project_key,
            )));
        }
        sinks
    }

    fn write_results(&self, results: &[CheckResult]) -> Result<()> {
        let mut file = std::fs::File::create(&self.config.results_file)?;
        for result in results {
            serde_json::to_writer(&mut file, result)?;
            file.write_all(b"\n")?;
        }
        file.flush()?;
        tracing::info!(
            path = %self.config.results_file,
            count = results.len(),
            "results written"
        );
        Ok(())
    }
}
