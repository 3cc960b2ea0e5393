//! # Code Kinds
//!
//! The six requisite kinds this crate validates, and the permitted lengths
//! of each. One enum, matched exhaustively wherever a kind decides
//! behavior.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BankreqError;
use crate::structure::LengthSet;

/// A Russian organization or bank requisite kind.
///
/// | Kind | Meaning | Lengths |
/// |------|---------|---------|
/// | INN  | Taxpayer identification number | 10, 12 |
/// | KPP  | Tax registration reason code | 9 |
/// | OGRN | State registration number | 13, 15 |
/// | BIK  | Bank identification code | 9 |
/// | RS   | Settlement account | 20 |
/// | KS   | Correspondent account | 20 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    /// Taxpayer identification number.
    Inn,
    /// Tax registration reason code.
    Kpp,
    /// State registration number (OGRN or OGRNIP).
    Ogrn,
    /// Bank identification code.
    Bik,
    /// Settlement (current) account.
    Rs,
    /// Correspondent account.
    Ks,
}

impl CodeKind {
    /// All kinds in canonical order.
    pub fn all() -> &'static [CodeKind] {
        &[
            Self::Inn,
            Self::Kpp,
            Self::Ogrn,
            Self::Bik,
            Self::Rs,
            Self::Ks,
        ]
    }

    /// Lowercase identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inn => "inn",
            Self::Kpp => "kpp",
            Self::Ogrn => "ogrn",
            Self::Bik => "bik",
            Self::Rs => "rs",
            Self::Ks => "ks",
        }
    }

    /// Permitted lengths for this kind.
    pub fn lengths(&self) -> LengthSet {
        match self {
            Self::Inn => LengthSet::INN,
            Self::Kpp => LengthSet::KPP,
            Self::Ogrn => LengthSet::OGRN,
            Self::Bik => LengthSet::BIK,
            Self::Rs | Self::Ks => LengthSet::ACCOUNT,
        }
    }

    /// Whether validating this kind needs a BIK alongside the code.
    pub fn requires_bik(&self) -> bool {
        matches!(self, Self::Rs | Self::Ks)
    }
}

/// Displays the conventional uppercase abbreviation (`INN`, `KS`, ...).
impl std::fmt::Display for CodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

impl FromStr for CodeKind {
    type Err = BankreqError;

    /// Parse a kind from its identifier, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inn" => Ok(Self::Inn),
            "kpp" => Ok(Self::Kpp),
            "ogrn" => Ok(Self::Ogrn),
            "bik" => Ok(Self::Bik),
            "rs" => Ok(Self::Rs),
            "ks" => Ok(Self::Ks),
            _ => Err(BankreqError::UnknownKind(s.to_string())),
        }
    }
}
