//! `tonelt` — the `validate-tonel` CLI.
//!
//! Tonel has exactly one operation, so the flags attach straight to the
//! top-level `Cli` struct instead of a `Subcommand` enum.

mod commands;
mod config;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{run_validate, ValidateArgs};
use config::Config;
use error::{Result, TonelCliError};

/// Validates a Tonel source file against the Tonel/STON/Smalltalk grammar.
#[derive(Parser, Debug)]
#[command(name = "validate-tonel")]
#[command(author = "Tonel Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validates a Tonel source file", long_about = None)]
struct Cli {
    /// Validate file structure only; do not parse method bodies.
    #[arg(long)]
    without_method_body: bool,

    /// Path to a tonelt configuration file.
    #[arg(short, long, env = "TONELT_CONFIG")]
    config: Option<PathBuf>,

    /// The `.tonel` file to validate.
    path: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        },
    }
}

fn run(cli: Cli) -> Result<bool> {
    init_logging()?;
    let config = load_config(cli.config.as_deref())?;
    let without_method_body = cli.without_method_body || config.without_method_body;

    let outcome = run_validate(ValidateArgs { path: cli.path, without_method_body });
    if outcome.ok {
        println!("{}", outcome.message);
    } else {
        eprintln!("{}", outcome.message);
    }
    Ok(outcome.ok)
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| TonelCliError::Config(format!("failed to initialize logging: {e}")))?;
    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_path_and_flag() {
        let cli = Cli::parse_from(["validate-tonel", "--without-method-body", "a.tonel"]);
        assert!(cli.without_method_body);
        assert_eq!(cli.path, PathBuf::from("a.tonel"));
    }

    #[test]
    fn cli_defaults_to_full_validation() {
        let cli = Cli::parse_from(["validate-tonel", "a.tonel"]);
        assert!(!cli.without_method_body);
    }
}
