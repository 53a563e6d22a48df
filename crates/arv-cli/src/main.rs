//! # arv CLI entry point
//!
//! Parses command-line arguments, initializes logging and runs the
//! validation handler.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arv_cli::{no_color_requested, run_validate, RunOptions, Settings, ValidateArgs, EXIT_FATAL};

/// Apigility RAML validator.
///
/// Checks that an Apigility project implements a RAML specification: the
/// module and version folders exist, every resource has a route, the
/// implemented HTTP methods match the declared ones, and the documentation
/// matches the declared descriptions.
#[derive(Parser, Debug)]
#[command(name = "arv", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a YAML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("arv {} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let options = RunOptions::merge(cli.args, settings, no_color_requested())?;
    tracing::debug!(?options, "resolved options");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate(&options, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arv_cli::ReportFormat;

    #[test]
    fn cli_parse_positionals() {
        let cli = Cli::try_parse_from(["arv", "api.raml", "app"]).unwrap();
        assert_eq!(cli.args.spec, Some(PathBuf::from("api.raml")));
        assert_eq!(cli.args.project, Some(PathBuf::from("app")));
        assert!(cli.args.module.is_none());
        assert!(!cli.args.debug);
        assert!(cli.args.format.is_none());
        assert!(!cli.args.no_color);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_parse_short_flags() {
        let cli = Cli::try_parse_from(["arv", "-m", "Store", "-d", "-vv", "api.raml", "app"]).unwrap();
        assert_eq!(cli.args.module.as_deref(), Some("Store"));
        assert!(cli.args.debug);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parse_long_flags() {
        let cli = Cli::try_parse_from([
            "arv",
            "--module",
            "Store",
            "--debug",
            "--format",
            "json",
            "--no-color",
            "--config",
            "arv.yaml",
            "api.raml",
            "app",
        ])
        .unwrap();
        assert_eq!(cli.args.module.as_deref(), Some("Store"));
        assert!(cli.args.debug);
        assert_eq!(cli.args.format, Some(ReportFormat::Json));
        assert!(cli.args.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("arv.yaml")));
    }

    #[test]
    fn cli_positionals_optional_with_config() {
        let cli = Cli::try_parse_from(["arv", "--config", "arv.yaml"]).unwrap();
        assert!(cli.args.spec.is_none());
        assert!(cli.args.project.is_none());
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["arv", "--format", "xml", "api.raml", "app"]).is_err());
    }

    #[test]
    fn cli_rejects_extra_positional() {
        assert!(Cli::try_parse_from(["arv", "a", "b", "c"]).is_err());
    }

    #[test]
    fn cli_verify_command() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
