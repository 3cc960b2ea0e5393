//! # Validate Subcommand
//!
//! Loads a bank-details record from a YAML or JSON file and validates
//! every field under the configured policy.

use std::path::PathBuf;

use anyhow::Result;
use bankreq_core::{BankDetails, FieldErrors, ValidationPolicy};
use clap::Args;

use crate::{load_document, EXIT_INVALID, EXIT_VALID};

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the bank-details record (YAML, or JSON by extension).
    pub file: PathBuf,
}

/// Render the outcome of record validation.
///
/// Text mode prints `ok`, or one `field: reason` line per failing field.
/// JSON mode prints the field-error map, empty when the record is valid.
pub fn render_outcome(errors: &FieldErrors, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(errors)?);
    }
    if errors.is_empty() {
        return Ok("ok".to_string());
    }
    let lines: Vec<String> = errors
        .iter()
        .map(|(field, err)| format!("{field}: {err}"))
        .collect();
    Ok(lines.join("\n"))
}

/// Validate the record at `args.file`, returning its field errors.
pub fn validate_file(args: &ValidateArgs, policy: &ValidationPolicy) -> Result<FieldErrors> {
    let details: BankDetails = load_document(&args.file)?;
    let errors = match details.validate(policy) {
        Ok(_) => FieldErrors::default(),
        Err(errors) => errors,
    };
    tracing::info!(
        path = %args.file.display(),
        invalid_fields = errors.len(),
        "validated bank details"
    );
    Ok(errors)
}

/// Execute the validate subcommand and print the outcome.
pub fn run_validate(args: &ValidateArgs, policy: &ValidationPolicy, json: bool) -> Result<u8> {
    let errors = validate_file(args, policy)?;
    println!("{}", render_outcome(&errors, json)?);
    Ok(if errors.is_empty() {
        EXIT_VALID
    } else {
        EXIT_INVALID
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const METRO_YAML: &str = "\
legal_address: 129110, Moscow, Mira av. 41
inn: '7702038150'
kpp: '770201001'
rs: '40602810900070000003'
ks: '30101810500000000219'
bik: '044525219'
bank_name: Bank of Moscow
";

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn args_for(file: &tempfile::NamedTempFile) -> ValidateArgs {
        ValidateArgs {
            file: file.path().to_path_buf(),
        }
    }

    #[test]
    fn valid_yaml_record() {
        let file = write_temp(".yaml", METRO_YAML);
        let errors = validate_file(&args_for(&file), &ValidationPolicy::default()).unwrap();
        assert!(errors.is_empty());
        assert_eq!(render_outcome(&errors, false).unwrap(), "ok");
        assert_eq!(render_outcome(&errors, true).unwrap(), "{}");
    }

    #[test]
    fn invalid_record_lists_fields() {
        let yaml = METRO_YAML.replace("7702038150", "7702038151");
        let file = write_temp(".yml", &yaml);
        let errors = validate_file(&args_for(&file), &ValidationPolicy::default()).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            render_outcome(&errors, false).unwrap(),
            "inn: check number mismatch"
        );
    }

    #[test]
    fn json_record_by_extension() {
        let file = write_temp(
            ".json",
            r#"{"legal_address": "Moscow", "inn": "7701992807", "kpp": "770101001",
               "rs": "40702810100020002772", "ks": "30101810000000000201",
               "bik": "044525201", "bank_name": "Avangard"}"#,
        );
        let errors = validate_file(&args_for(&file), &ValidationPolicy::default()).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn json_output_is_field_map() {
        let yaml = METRO_YAML.replace("'30101810500000000219'", "'30001810500000000219'");
        let file = write_temp(".yaml", &yaml);
        let errors = validate_file(&args_for(&file), &ValidationPolicy::default()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&render_outcome(&errors, true).unwrap()).unwrap();
        assert_eq!(value["ks"]["tag"], "ks_first_3");
    }

    #[test]
    fn policy_applies_to_text_limit() {
        let file = write_temp(".yaml", METRO_YAML);
        let policy = ValidationPolicy::new(10, true).unwrap();
        let errors = validate_file(&args_for(&file), &policy).unwrap();
        assert_eq!(
            errors.iter().map(|(f, e)| (f.as_str(), e.tag())).collect::<Vec<_>>(),
            vec![("legal_address", "max_length"), ("bank_name", "max_length")]
        );
    }

    #[test]
    fn run_validate_exit_codes() {
        let file = write_temp(".yaml", METRO_YAML);
        let code = run_validate(&args_for(&file), &ValidationPolicy::default(), false).unwrap();
        assert_eq!(code, EXIT_VALID);

        let file = write_temp(".yaml", &METRO_YAML.replace("044525219", "04452521q"));
        let code = run_validate(&args_for(&file), &ValidationPolicy::default(), true).unwrap();
        assert_eq!(code, EXIT_INVALID);
    }

    #[test]
    fn unreadable_file_is_error() {
        let args = ValidateArgs {
            file: PathBuf::from("/nonexistent/details.yaml"),
        };
        assert!(validate_file(&args, &ValidationPolicy::default()).is_err());
    }
}
