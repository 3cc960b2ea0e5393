//! # Check Subcommand
//!
//! Verifies a single code and reports the first failed check.

use anyhow::{bail, Result};
use bankreq_core::{check, CodeKind};
use clap::Args;
use serde::Serialize;

use crate::{EXIT_INVALID, EXIT_VALID};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Kind of code: inn, kpp, ogrn, bik, rs or ks.
    pub kind: CodeKind,

    /// The code to verify.
    pub code: String,

    /// BIK of the bank holding the account (required for rs and ks).
    #[arg(long)]
    pub bik: Option<String>,
}

/// Outcome of checking one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Kind the code was checked as.
    pub kind: CodeKind,
    /// The code exactly as given on the command line.
    pub code: String,
    /// Whether every check passed.
    pub valid: bool,
    /// Tag of the failed check, `null` when valid.
    pub failure: Option<&'static str>,
    #[serde(skip)]
    reason: Option<String>,
}

impl CheckReport {
    /// Render as a single line of text, or as JSON.
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string(self)?);
        }
        Ok(match &self.reason {
            None => "valid".to_string(),
            Some(reason) => format!("invalid: {reason}"),
        })
    }

    /// [`EXIT_VALID`] or [`EXIT_INVALID`].
    pub fn exit_code(&self) -> u8 {
        if self.valid {
            EXIT_VALID
        } else {
            EXIT_INVALID
        }
    }
}

/// Run the check without printing.
///
/// # Errors
///
/// Fails when an account is checked without `--bik`.
pub fn check_code(args: &CheckArgs) -> Result<CheckReport> {
    if args.kind.requires_bik() && args.bik.is_none() {
        bail!("--bik is required to check a {} account", args.kind);
    }

    let verdict = check(args.kind, &args.code, args.bik.as_deref());
    tracing::debug!(kind = args.kind.as_str(), ok = verdict.is_ok(), "checked code");

    let (failure, reason) = match verdict {
        Ok(()) => (None, None),
        Err(failure) => (Some(failure.tag()), Some(failure.to_string())),
    };
    Ok(CheckReport {
        kind: args.kind,
        code: args.code.clone(),
        valid: failure.is_none(),
        failure,
        reason,
    })
}

/// Execute the check subcommand and print the verdict.
pub fn run_check(args: &CheckArgs, json: bool) -> Result<u8> {
    let report = check_code(args)?;
    println!("{}", report.render(json)?);
    Ok(report.exit_code())
}
