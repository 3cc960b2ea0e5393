//! # Validation Policy
//!
//! The few knobs a deployment may turn when validating a full
//! [`BankDetails`](crate::requisites::BankDetails) record. Defaults match
//! the stock behavior: free-text fields up to 255 characters, KPP always
//! required.
//!
//! A policy is plain serde data, so it can be loaded from YAML or JSON.
//! Any subset of fields may be given; unknown fields are rejected.

use serde::{Deserialize, Serialize};

use crate::error::ContractError;

/// Default maximum length of free-text fields, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 255;

/// Settings for record-level validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PolicyRepr")]
pub struct ValidationPolicy {
    max_text_chars: usize,
    require_kpp: bool,
}

/// Wire form of [`ValidationPolicy`], validated on conversion.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PolicyRepr {
    max_text_chars: usize,
    require_kpp: bool,
}

impl Default for PolicyRepr {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            require_kpp: true,
        }
    }
}

impl TryFrom<PolicyRepr> for ValidationPolicy {
    type Error = ContractError;

    fn try_from(repr: PolicyRepr) -> Result<Self, Self::Error> {
        Self::new(repr.max_text_chars, repr.require_kpp)
    }
}

impl ValidationPolicy {
    /// Build a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ZeroTextLimit`] if `max_text_chars` is zero.
    pub fn new(max_text_chars: usize, require_kpp: bool) -> Result<Self, ContractError> {
        if max_text_chars == 0 {
            return Err(ContractError::ZeroTextLimit);
        }
        Ok(Self {
            max_text_chars,
            require_kpp,
        })
    }

    /// Maximum length of `legal_address` and `bank_name`, in characters.
    pub fn max_text_chars(&self) -> usize {
        self.max_text_chars
    }

    /// Whether a KPP is required even for individuals (12-digit INN).
    pub fn require_kpp(&self) -> bool {
        self.require_kpp
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            require_kpp: true,
        }
    }
}
