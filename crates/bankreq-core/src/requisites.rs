//! # Bank Details Record
//!
//! The full set of requisites an organization holding a bank account
//! submits: legal address, INN, KPP, settlement and correspondent accounts,
//! BIK and bank name.
//!
//! [`BankDetails::validate`] checks every field independently and either
//! returns a [`VerifiedBankDetails`] built from the validated newtypes, or a
//! [`FieldErrors`] map listing *every* failing field. There is no partial
//! acceptance.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::diagnose::{check_ks, check_rs};
use crate::error::{CheckFailure, ValidationError};
use crate::identity::{Bik, CorrespondentAccount, HolderKind, Inn, Kpp, SettlementAccount};
use crate::policy::ValidationPolicy;

/// Unvalidated bank details, as received from a form or a file.
///
/// Missing fields deserialize as empty strings and are reported as blank.
/// Extra fields (for example an organization name) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    /// Registered legal address.
    pub legal_address: String,
    /// Taxpayer identification number.
    pub inn: String,
    /// Tax registration reason code.
    pub kpp: String,
    /// Settlement account.
    pub rs: String,
    /// Correspondent account.
    pub ks: String,
    /// Bank identification code.
    pub bik: String,
    /// Bank name.
    pub bank_name: String,
}

/// Bank details whose every field passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedBankDetails {
    /// Registered legal address.
    pub legal_address: String,
    /// Taxpayer identification number.
    pub inn: Inn,
    /// Tax registration reason code; absent only when the policy allows an
    /// individual to omit it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpp: Option<Kpp>,
    /// Settlement account.
    pub rs: SettlementAccount,
    /// Correspondent account.
    pub ks: CorrespondentAccount,
    /// Bank identification code.
    pub bik: Bik,
    /// Bank name.
    pub bank_name: String,
}

/// A field of [`BankDetails`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// `legal_address`
    LegalAddress,
    /// `inn`
    Inn,
    /// `kpp`
    Kpp,
    /// `rs`
    Rs,
    /// `ks`
    Ks,
    /// `bik`
    Bik,
    /// `bank_name`
    BankName,
}

impl Field {
    /// The field name as it appears in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LegalAddress => "legal_address",
            Self::Inn => "inn",
            Self::Kpp => "kpp",
            Self::Rs => "rs",
            Self::Ks => "ks",
            Self::Bik => "bik",
            Self::BankName => "bank_name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A requisite check failed (also used for blank text).
    #[error("{0}")]
    Check(CheckFailure),

    /// Free text exceeds the policy's character limit.
    #[error("text must be at most {max} characters (got {actual})")]
    TooLong {
        /// Configured limit.
        max: usize,
        /// Character count of the rejected text.
        actual: usize,
    },
}

impl FieldError {
    /// Stable snake_case tag for this error.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Check(failure) => failure.tag(),
            Self::TooLong { .. } => "max_length",
        }
    }
}

impl From<CheckFailure> for FieldError {
    fn from(failure: CheckFailure) -> Self {
        Self::Check(failure)
    }
}

impl From<ValidationError> for FieldError {
    fn from(err: ValidationError) -> Self {
        Self::Check(err.failure)
    }
}

/// Every failing field of a rejected record, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    /// The error for `field`, if it failed.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Whether `field` failed.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields and their errors, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }

    fn record<T>(&mut self, field: Field, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(
                    field = field.as_str(),
                    failure = err.tag(),
                    "bank details field rejected"
                );
                self.0.insert(field, err);
                None
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid field(s)", self.0.len())?;
        for (i, (field, err)) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{field} ({err})")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Serializes as `{ "<field>": { "tag": ..., "message": ... }, ... }`.
impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            tag: &'a str,
            message: String,
        }

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, err) in &self.0 {
            map.serialize_entry(
                field.as_str(),
                &Entry {
                    tag: err.tag(),
                    message: err.to_string(),
                },
            )?;
        }
        map.end()
    }
}

fn check_text(text: &str, policy: &ValidationPolicy) -> Result<String, FieldError> {
    if text.trim().is_empty() {
        return Err(CheckFailure::Blank.into());
    }
    let actual = text.chars().count();
    if actual > policy.max_text_chars() {
        return Err(FieldError::TooLong {
            max: policy.max_text_chars(),
            actual,
        });
    }
    Ok(text.to_string())
}

impl BankDetails {
    /// Validate every field under `policy`.
    ///
    /// Accounts are checked against this record's own BIK. When the BIK is
    /// malformed, accounts that are otherwise well-shaped are reported as
    /// [`CheckFailure::BikInvalid`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldErrors`] listing every field that failed.
    pub fn validate(&self, policy: &ValidationPolicy) -> Result<VerifiedBankDetails, FieldErrors> {
        let mut errors = FieldErrors::default();

        let legal_address = errors.record(
            Field::LegalAddress,
            check_text(&self.legal_address, policy),
        );
        let inn = errors.record(Field::Inn, Inn::new(self.inn.as_str()).map_err(FieldError::from));

        let kpp_optional = !policy.require_kpp()
            && inn.as_ref().map(Inn::holder) == Some(HolderKind::Individual);
        let kpp = if kpp_optional && self.kpp.is_empty() {
            Some(None)
        } else {
            errors
                .record(Field::Kpp, Kpp::new(self.kpp.as_str()).map_err(FieldError::from))
                .map(Some)
        };

        let bik = errors.record(Field::Bik, Bik::new(self.bik.as_str()).map_err(FieldError::from));
        let (rs, ks) = match &bik {
            Some(bik) => (
                errors.record(
                    Field::Rs,
                    SettlementAccount::new(self.rs.as_str(), bik).map_err(FieldError::from),
                ),
                errors.record(
                    Field::Ks,
                    CorrespondentAccount::new(self.ks.as_str(), bik).map_err(FieldError::from),
                ),
            ),
            None => {
                // Without a usable BIK the accounts can never pass; report
                // the most specific reason the diagnostics give.
                let rs_failure = check_rs(&self.rs, &self.bik)
                    .err()
                    .unwrap_or(CheckFailure::BikInvalid);
                let ks_failure = check_ks(&self.ks, &self.bik)
                    .err()
                    .unwrap_or(CheckFailure::BikInvalid);
                errors.record::<()>(Field::Rs, Err(rs_failure.into()));
                errors.record::<()>(Field::Ks, Err(ks_failure.into()));
                (None, None)
            }
        };

        let bank_name = errors.record(Field::BankName, check_text(&self.bank_name, policy));

        match (legal_address, inn, kpp, rs, ks, bik, bank_name) {
            (
                Some(legal_address),
                Some(inn),
                Some(kpp),
                Some(rs),
                Some(ks),
                Some(bik),
                Some(bank_name),
            ) if errors.is_empty() => Ok(VerifiedBankDetails {
                legal_address,
                inn,
                kpp,
                rs,
                ks,
                bik,
                bank_name,
            }),
            _ => Err(errors),
        }
    }

    /// True iff [`validate`](Self::validate) would succeed.
    pub fn is_valid(&self, policy: &ValidationPolicy) -> bool {
        self.validate(policy).is_ok()
    }
}
