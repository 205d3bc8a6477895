//! certsweep - certificate expiry sweeps across discovered hostnames

use certsweep::checks::probe::TlsProber;
use certsweep::cli::{CheckArgs, Cli, Commands};
use certsweep::config::PipelineConfig;
use certsweep::error::{Result, SweepError};
use certsweep::models::{Domain, Provider};
use certsweep::output;
use certsweep::pipeline::checker::{CheckOptions, Checker};
use certsweep::pipeline::report::summarize;
use certsweep::runner::Pipeline;
use clap::Parser;
use console::style;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Install the ring crypto provider for rustls
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Logging goes to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.no_color {
        console::set_colors_enabled(false);
    }

    match run(cli.command).await {
        Ok(code) => std::process::exit(code),
        Err(e @ SweepError::Config(_)) => {
            eprintln!("{} {}", style("Configuration error:").red().bold(), e);
            std::process::exit(2);
        }
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(2);
        }
    }
}

async fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Check(args) => run_check(args).await,
        Commands::Run(args) => {
            let config = PipelineConfig::load(args.config.as_deref())?;
            Pipeline::new(config).run().await
        }
    }
}

/// Check an explicit host list: one JSON result line per host on stdout,
/// styled status and summary on stderr. Exit 0 only if every host passes.
async fn run_check(args: CheckArgs) -> Result<i32> {
    let opts = CheckOptions {
        threshold_days: args.threshold,
        port: args.port,
        per_host_timeout: Duration::from_secs(args.timeout),
        global_budget: Duration::from_secs(args.budget),
        concurrency: args.parallel,
    };

    let domains = args
        .hosts
        .into_iter()
        .map(|hostname| Domain::new(hostname, Provider::Manual))
        .collect();

    let checker = Checker::new(Arc::new(TlsProber::new()));
    let results = checker.run(domains, &opts).await;

    output::print_result_lines(&results)?;
    output::print_status_lines(&results);

    let (summary, exit_code) = summarize(&results, true);
    eprintln!("{summary}");

    Ok(exit_code)
}
