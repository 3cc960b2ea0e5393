//! # Structural Validators
//!
//! Length and digit-only checks shared by every code kind. These run
//! before any checksum: the checksum functions index into the code and
//! assume it is the right length and made of ASCII digits only.
//!
//! Permitted lengths are an explicit [`LengthSet`] per code kind instead of
//! an ad-hoc tuple. A set can be built at runtime (from configuration or
//! text), in which case its entries are checked once at the boundary.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// A non-empty set of permitted code lengths, counted in characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LengthSet(Cow<'static, [usize]>);

impl LengthSet {
    /// INN: 10 digits for legal entities, 12 for individuals.
    pub const INN: LengthSet = LengthSet(Cow::Borrowed(&[10, 12]));
    /// KPP: 9 digits.
    pub const KPP: LengthSet = LengthSet(Cow::Borrowed(&[9]));
    /// OGRN: 13 digits, or 15 for individual entrepreneurs (OGRNIP).
    pub const OGRN: LengthSet = LengthSet(Cow::Borrowed(&[13, 15]));
    /// BIK: 9 digits.
    pub const BIK: LengthSet = LengthSet(Cow::Borrowed(&[9]));
    /// Settlement and correspondent accounts: 20 digits.
    pub const ACCOUNT: LengthSet = LengthSet(Cow::Borrowed(&[20]));

    /// Build a length set from runtime values.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::EmptyLengthSet`] for an empty slice and
    /// [`ContractError::ZeroLength`] if any entry is zero.
    pub fn new(mut lengths: Vec<usize>) -> Result<Self, ContractError> {
        if lengths.is_empty() {
            return Err(ContractError::EmptyLengthSet);
        }
        if lengths.contains(&0) {
            return Err(ContractError::ZeroLength);
        }
        lengths.sort_unstable();
        lengths.dedup();
        Ok(Self(Cow::Owned(lengths)))
    }

    /// Whether `len` is one of the permitted lengths.
    pub fn contains(&self, len: usize) -> bool {
        self.0.contains(&len)
    }

    /// The permitted lengths in ascending order.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for LengthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lengths = self.as_slice();
        for (i, len) in lengths.iter().enumerate() {
            if i > 0 {
                let sep = if i + 1 == lengths.len() { " or " } else { ", " };
                f.write_str(sep)?;
            }
            write!(f, "{len}")?;
        }
        Ok(())
    }
}

/// Parses a comma-separated list such as `"10,12"`.
impl FromStr for LengthSet {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lengths = s
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry
                    .parse::<usize>()
                    .map_err(|_| ContractError::NonIntegerLength(entry.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(lengths)
    }
}

impl<'de> Deserialize<'de> for LengthSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<usize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// True iff the character count of `code` is a permitted length.
pub fn length_ok(code: &str, allowed: &LengthSet) -> bool {
    allowed.contains(code.chars().count())
}

/// True iff every character of `code` is an ASCII digit `0`-`9`.
///
/// Whitespace, signs, letters and non-ASCII digits (Arabic-Indic,
/// full-width and so on) all fail. An empty string passes vacuously;
/// the length check is what rejects it.
pub fn structure_ok(code: &str) -> bool {
    code.chars().all(|c| c.is_ascii_digit())
}
