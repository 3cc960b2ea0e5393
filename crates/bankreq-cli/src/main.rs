//! # bankreq CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use bankreq_cli::check::{run_check, CheckArgs};
use bankreq_cli::validate::{run_validate, ValidateArgs};
use bankreq_cli::{load_policy, EXIT_USAGE};

/// Validate Russian organization and bank requisites.
///
/// Checks INN, KPP, OGRN/OGRNIP, BIK, settlement and correspondent
/// account numbers, one at a time or as a complete bank-details record.
#[derive(Parser, Debug)]
#[command(name = "bankreq", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a validation policy file (YAML, or JSON by extension).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results, and log lines on stderr, as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a single code.
    Check(CheckArgs),

    /// Validate a bank-details record file.
    Validate(ValidateArgs),
}

/// Build the log subscriber: verbosity from `-v`, JSON lines under `--json`.
fn build_subscriber<W>(
    verbose: u8,
    json: bool,
    writer: W,
) -> Box<dyn tracing::Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer);

    if json {
        Box::new(builder.json().finish())
    } else {
        Box::new(builder.finish())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = build_subscriber(cli.verbose, cli.json, std::io::stderr);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("bankreq: failed to install log subscriber: {e}");
    }

    let result = match &cli.command {
        Commands::Check(args) => run_check(args, cli.json),
        Commands::Validate(args) => load_policy(cli.config.as_deref())
            .and_then(|policy| run_validate(args, &policy, cli.json)),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}
