use super::*;
use crate::resolve::{apply_overrides, OutputFormat, StatusFilter};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("expected valid cli args")
}

#[test]
fn parses_resolve_with_positional_ids() {
    let cli = parse(&["buybox-cli", "resolve", "B000000001", "B000000002"]);

    let Commands::Resolve(args) = cli.command else {
        panic!("expected resolve command");
    };
    assert_eq!(args.input.ids, ["B000000001", "B000000002"]);
    assert!(args.input.file.is_none());
    assert_eq!(args.format, OutputFormat::Table);
    assert!(args.statuses.is_empty());
}

#[test]
fn parses_resolve_options() {
    let cli = parse(&[
        "buybox-cli",
        "resolve",
        "--file",
        "ids.txt",
        "--format",
        "json",
        "--status",
        "third-party",
        "--status",
        "reprocess",
        "--workers",
        "4",
        "--backoff-base",
        "2.5",
    ]);

    let Commands::Resolve(args) = cli.command else {
        panic!("expected resolve command");
    };
    assert_eq!(
        args.input.file.as_deref(),
        Some(std::path::Path::new("ids.txt"))
    );
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(
        args.statuses,
        [StatusFilter::ThirdParty, StatusFilter::Reprocess]
    );
    assert_eq!(args.workers, Some(4));
    assert_eq!(args.backoff_base, Some(2.5));
}

#[test]
fn parses_validate_command() {
    let cli = parse(&["buybox-cli", "validate", "b000000001,bad"]);

    assert!(matches!(cli.command, Commands::Validate(_)));
}

#[test]
fn rejects_unknown_status() {
    let result = Cli::try_parse_from(["buybox-cli", "resolve", "--status", "sold-out"]);
    assert!(result.is_err());
}

#[test]
fn help_is_rendered_by_the_parser() {
    let err = Cli::try_parse_from(["buybox-cli", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    assert!(err.to_string().contains("resolve"));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["buybox-cli"]).is_err());
}

#[test]
fn overrides_replace_environment_values() {
    let cli = parse(&[
        "buybox-cli",
        "resolve",
        "--workers",
        "2",
        "--timeout-secs",
        "5",
        "--retries",
        "0",
        "--cycles",
        "1",
        "--base-url",
        "http://127.0.0.1:9000/",
    ]);
    let Commands::Resolve(args) = cli.command else {
        panic!("expected resolve command");
    };

    let config = apply_overrides(buybox_core::AppConfig::default(), &args).expect("valid overrides");

    assert_eq!(config.max_workers, 2);
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.retries_per_cycle, 0);
    assert_eq!(config.max_blocked_cycles, 1);
    assert_eq!(config.marketplace_base_url, "http://127.0.0.1:9000");
}

#[test]
fn zero_workers_override_is_rejected() {
    let cli = parse(&["buybox-cli", "resolve", "--workers", "0"]);
    let Commands::Resolve(args) = cli.command else {
        panic!("expected resolve command");
    };

    assert!(apply_overrides(buybox_core::AppConfig::default(), &args).is_err());
}

#[test]
fn non_positive_backoff_override_is_rejected() {
    let cli = parse(&["buybox-cli", "resolve", "--backoff-base", "0"]);
    let Commands::Resolve(args) = cli.command else {
        panic!("expected resolve command");
    };

    assert!(apply_overrides(buybox_core::AppConfig::default(), &args).is_err());
}
