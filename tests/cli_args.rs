use certsweep::cli::{Cli, Commands};
use clap::Parser;

#[test]
fn check_parses_hosts_and_defaults() {
    let cli = Cli::try_parse_from([
        "certsweep",
        "check",
        "--hosts",
        "a.example",
        "b.example",
    ])
    .unwrap();

    let Commands::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.hosts, ["a.example", "b.example"]);
    assert_eq!(args.threshold, 30);
    assert_eq!(args.timeout, 10);
    assert_eq!(args.budget, 300);
    assert_eq!(args.parallel, 16);
    assert_eq!(args.port, 443);
}

#[test]
fn check_requires_at_least_one_host() {
    assert!(Cli::try_parse_from(["certsweep", "check"]).is_err());
}

#[test]
fn check_accepts_tuning_flags() {
    let cli = Cli::try_parse_from([
        "certsweep",
        "check",
        "--hosts",
        "a.example",
        "--threshold",
        "14",
        "--timeout",
        "5",
        "--budget",
        "60",
        "--parallel",
        "4",
        "--port",
        "8443",
    ])
    .unwrap();

    let Commands::Check(args) = cli.command else {
        panic!("expected check subcommand");
    };
    assert_eq!(args.threshold, 14);
    assert_eq!(args.timeout, 5);
    assert_eq!(args.budget, 60);
    assert_eq!(args.parallel, 4);
    assert_eq!(args.port, 8443);
}

#[test]
fn run_accepts_an_optional_config_file() {
    let cli = Cli::try_parse_from(["certsweep", "run", "--config", "sweep.toml"]).unwrap();
    let Commands::Run(args) = cli.command else {
        panic!("expected run subcommand");
    };
    assert_eq!(args.config.unwrap().to_str(), Some("sweep.toml"));

    let cli = Cli::try_parse_from(["certsweep", "run"]).unwrap();
    assert!(matches!(cli.command, Commands::Run(_)));
}

#[test]
fn a_subcommand_is_required() {
    assert!(Cli::try_parse_from(["certsweep"]).is_err());
}
