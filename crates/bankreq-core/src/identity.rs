//! # Requisite Newtypes
//!
//! Domain-primitive newtypes for Russian organization and bank requisites.
//! Each code is a distinct type: a [`Kpp`] cannot be passed where a
//! [`Bik`] is expected, even though both are nine digits.
//!
//! ## Validation
//!
//! Standalone codes ([`Inn`], [`Kpp`], [`Ogrn`], [`Bik`]) validate at
//! construction and at deserialization. Account numbers depend on a BIK,
//! so [`SettlementAccount`] and [`CorrespondentAccount`] are built from an
//! already-validated [`Bik`] and only implement `Serialize`.

use serde::{Deserialize, Serialize};

use crate::checksum::{correspondent_prefix, settlement_prefix};
use crate::diagnose::{check_bik, check_inn, check_kpp, check_ks, check_ogrn, check_rs};
use crate::error::ValidationError;
use crate::kind::CodeKind;

/// Implement `Deserialize` for string newtypes by routing the raw string
/// through the type's `new()` constructor, so invalid values are rejected
/// at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Shared accessors for string newtypes.
macro_rules! impl_code_str {
    ($ty:ident) => {
        impl $ty {
            /// Access the code as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Who a registration code belongs to, inferred from its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderKind {
    /// A legal entity (10-digit INN, 13-digit OGRN).
    LegalEntity,
    /// An individual or individual entrepreneur (12-digit INN, 15-digit OGRNIP).
    Individual,
}

/// Taxpayer identification number (INN).
///
/// 10 digits for legal entities, 12 for individuals. Check digits are
/// verified at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Inn(String);

impl_validating_deserialize!(Inn);
impl_code_str!(Inn);

impl Inn {
    /// Create an INN, verifying length, digits and check digits.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first failed check.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        match check_inn(&s) {
            Ok(()) => Ok(Self(s)),
            Err(failure) => Err(ValidationError::new(CodeKind::Inn, s, failure)),
        }
    }

    /// Legal entity for 10 digits, individual for 12.
    pub fn holder(&self) -> HolderKind {
        if self.0.len() == 10 {
            HolderKind::LegalEntity
        } else {
            HolderKind::Individual
        }
    }
}

/// Tax registration reason code (KPP), 9 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Kpp(String);

impl_validating_deserialize!(Kpp);
impl_code_str!(Kpp);

impl Kpp {
    /// Create a KPP, verifying length and digits.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first failed check.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        match check_kpp(&s) {
            Ok(()) => Ok(Self(s)),
            Err(failure) => Err(ValidationError::new(CodeKind::Kpp, s, failure)),
        }
    }
}

/// State registration number: OGRN (13 digits) or OGRNIP (15 digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ogrn(String);

impl_validating_deserialize!(Ogrn);
impl_code_str!(Ogrn);

impl Ogrn {
    /// Create an OGRN, verifying length, digits and the check digit.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first failed check.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        match check_ogrn(&s) {
            Ok(()) => Ok(Self(s)),
            Err(failure) => Err(ValidationError::new(CodeKind::Ogrn, s, failure)),
        }
    }

    /// Legal entity for 13 digits, individual entrepreneur for 15.
    pub fn holder(&self) -> HolderKind {
        if self.0.len() == 13 {
            HolderKind::LegalEntity
        } else {
            HolderKind::Individual
        }
    }
}

/// Bank identification code (BIK), 9 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bik(String);

impl_validating_deserialize!(Bik);
impl_code_str!(Bik);

impl Bik {
    /// Create a BIK, verifying length and digits.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first failed check.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        match check_bik(&s) {
            Ok(()) => Ok(Self(s)),
            Err(failure) => Err(ValidationError::new(CodeKind::Bik, s, failure)),
        }
    }

    /// Prefix for settlement-account checksums: the last three digits.
    pub fn settlement_prefix(&self) -> &str {
        settlement_prefix(&self.0)
    }

    /// Prefix for correspondent-account checksums: `0` and digits 5-6.
    pub fn correspondent_prefix(&self) -> String {
        correspondent_prefix(&self.0)
    }
}

/// Settlement (current) account, 20 digits, verified against a BIK.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SettlementAccount(String);

impl_code_str!(SettlementAccount);

impl SettlementAccount {
    /// Create a settlement account whose checksum holds against `bik`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first failed check.
    pub fn new(value: impl Into<String>, bik: &Bik) -> Result<Self, ValidationError> {
        let s = value.into();
        match check_rs(&s, bik.as_str()) {
            Ok(()) => Ok(Self(s)),
            Err(failure) => Err(ValidationError::new(CodeKind::Rs, s, failure)),
        }
    }
}

/// Correspondent account, 20 digits, verified against a BIK.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CorrespondentAccount(String);

impl_code_str!(CorrespondentAccount);

impl CorrespondentAccount {
    /// Create a correspondent account consistent with `bik`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first failed check.
    pub fn new(value: impl Into<String>, bik: &Bik) -> Result<Self, ValidationError> {
        let s = value.into();
        match check_ks(&s, bik.as_str()) {
            Ok(()) => Ok(Self(s)),
            Err(failure) => Err(ValidationError::new(CodeKind::Ks, s, failure)),
        }
    }
}
