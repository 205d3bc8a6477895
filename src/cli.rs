//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "certsweep")]
#[command(version)]
#[command(about = "Discover TLS hostnames and check certificate expiry", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check certificates for an explicit list of hosts
    Check(CheckArgs),

    /// Run the full discovery, check and alerting pipeline
    Run(RunArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Hostnames to check
    #[arg(long = "hosts", num_args = 1.., required = true)]
    pub hosts: Vec<String>,

    /// Days-remaining threshold below which a certificate fails
    #[arg(long, default_value = "30")]
    pub threshold: i64,

    /// Per-host connection + handshake timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,

    /// Wall-clock budget for the whole batch in seconds
    #[arg(long, default_value = "300")]
    pub budget: u64,

    /// Number of parallel checks
    #[arg(short, long, default_value = "16")]
    pub parallel: usize,

    /// Custom port
    #[arg(long, default_value = "443")]
    pub port: u16,
}

#[derive(Args)]
pub struct RunArgs {
    /// Configuration file (TOML); environment variables override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
