//! # bankreq-cli — Command-Line Front End
//!
//! Provides the `bankreq` binary on top of `bankreq-core`.
//!
//! ## Subcommands
//!
//! - `bankreq check <kind> <code> [--bik <bik>]`: verify one code.
//! - `bankreq validate <file>`: verify a whole bank-details record.
//!
//! ```bash
//! bankreq check inn 7702038150
//! bankreq check rs 40602810900070000003 --bik 044525219
//! bankreq --config policy.yaml --json validate details.yaml
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers take parsed arguments.
//! - Every verdict comes from `bankreq-core`. This crate only loads files
//!   and renders results.
//! - Exit codes: [`EXIT_VALID`], [`EXIT_INVALID`], [`EXIT_USAGE`].

#![deny(missing_docs)]

pub mod check;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use bankreq_core::ValidationPolicy;
use serde::de::DeserializeOwned;

/// Exit code when every checked value is valid.
pub const EXIT_VALID: u8 = 0;

/// Exit code when a checked value is invalid.
pub const EXIT_INVALID: u8 = 1;

/// Exit code for usage errors, unreadable files and contract violations.
pub const EXIT_USAGE: u8 = 2;

/// Load a YAML document, or JSON when the file extension is `.json`.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON from {}", path.display()))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML from {}", path.display()))
    }
}

/// Load the validation policy from `--config`, or the default policy.
pub fn load_policy(config: Option<&Path>) -> Result<ValidationPolicy> {
    match config {
        Some(path) => {
            let policy: ValidationPolicy = load_document(path)?;
            tracing::debug!(
                path = %path.display(),
                max_text_chars = policy.max_text_chars(),
                require_kpp = policy.require_kpp(),
                "loaded validation policy"
            );
            Ok(policy)
        }
        None => Ok(ValidationPolicy::default()),
    }
}
