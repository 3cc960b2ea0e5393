//! # Error Hierarchy
//!
//! Structured error types for the requisites validator, built with `thiserror`.
//!
//! Bad input *data* is never an error here: a malformed INN is a `false`
//! from the boolean validators, or a [`CheckFailure`] tag from the
//! diagnostic layer. Only misuse of the API by the caller, such as an empty
//! set of permitted lengths or a non-digit handed to the digit-sum engine,
//! surfaces as a [`ContractError`].

use thiserror::Error;

use crate::kind::CodeKind;
use crate::structure::LengthSet;

/// Top-level error type for the requisites validator.
#[derive(Error, Debug)]
pub enum BankreqError {
    /// The caller broke an API precondition.
    #[error("contract violation: {0}")]
    Contract(#[from] ContractError),

    /// A requisite failed validation while constructing a newtype.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A code kind identifier was not recognized.
    #[error("unknown code kind: {0:?} (expected one of inn, kpp, ogrn, bik, rs, ks)")]
    UnknownKind(String),
}

/// Caller contract violations.
///
/// These are programmer errors, signalled immediately rather than
/// silently producing a wrong verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// A length set must permit at least one length.
    #[error("a set of permitted lengths must not be empty")]
    EmptyLengthSet,

    /// Zero is never a permitted code length.
    #[error("a permitted length must be greater than zero")]
    ZeroLength,

    /// An entry of a textual length set is not an integer.
    #[error("permitted length \"{0}\" is not an integer")]
    NonIntegerLength(String),

    /// The digit-sum engine was handed a character that is not `0`-`9`.
    #[error("non-digit character {found:?} at position {position}")]
    NonDigit {
        /// Zero-based character position within the code.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// Text fields must be allowed at least one character.
    #[error("maximum text length must be greater than zero")]
    ZeroTextLimit,

    /// A remainder was requested modulo zero.
    #[error("divisor must be greater than zero")]
    ZeroDivisor,

    /// A weighted sum does not fit in `u32`.
    #[error("weighted sum overflows at position {position}")]
    Overflow {
        /// Zero-based character position where the sum overflowed.
        position: usize,
    },
}

/// The reason a single requisite was rejected.
///
/// These are the tags consumers map to user-facing messages. Exactly one
/// tag is reported per rejected value: the first check that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// The value is empty.
    #[error("value must not be blank")]
    Blank,

    /// The value has a length outside the permitted set.
    #[error("wrong length {actual} (expected {expected})")]
    Length {
        /// Lengths permitted for this code kind.
        expected: LengthSet,
        /// Character count of the rejected value.
        actual: usize,
    },

    /// The value contains something other than ASCII digits.
    #[error("value must consist of digits 0-9 only")]
    Structure,

    /// The check digit(s) do not match the computed value.
    #[error("check number mismatch")]
    CheckNumber,

    /// An account's checksum does not hold against the given BIK.
    #[error("check number mismatch against BIK")]
    BikMismatch,

    /// An account cannot be checked because the BIK it depends on is malformed.
    #[error("account cannot be verified against a malformed BIK")]
    BikInvalid,

    /// A correspondent account does not start with `301`.
    #[error("correspondent account must start with 301")]
    KsFirstDigits,

    /// The last three digits of a correspondent account differ from the BIK's.
    #[error("last three digits of correspondent account must match the BIK")]
    KsLastDigits,
}

impl CheckFailure {
    /// Stable snake_case tag for this failure, suitable for wire formats.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Length { .. } => "length",
            Self::Structure => "structure",
            Self::CheckNumber => "check_num",
            Self::BikMismatch => "check_num_bik",
            Self::BikInvalid => "bik_invalid",
            Self::KsFirstDigits => "ks_first_3",
            Self::KsLastDigits => "ks_last_3",
        }
    }
}

/// Validation failure raised by the identifier newtype constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: \"{value}\" ({failure})")]
pub struct ValidationError {
    /// Which code kind was being constructed.
    pub kind: CodeKind,
    /// The rejected input, verbatim.
    pub value: String,
    /// The first check that failed.
    pub failure: CheckFailure,
}

impl ValidationError {
    pub(crate) fn new(kind: CodeKind, value: impl Into<String>, failure: CheckFailure) -> Self {
        Self {
            kind,
            value: value.into(),
            failure,
        }
    }
}
