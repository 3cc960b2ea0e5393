//! # Checksum Validators
//!
//! Check-digit rules for INN, OGRN and bank accounts, plus the positional
//! rules tying a correspondent account to its BIK.
//!
//! | Code | Divisor | Input to the remainder | Check digit(s) |
//! |------|---------|------------------------|----------------|
//! | INN-10 | 11 | weighted sum of digits 1-9 | 10 |
//! | INN-12 | 11 | weighted sums of digits 1-10 and 1-11 | 11 and 12 |
//! | OGRN-13 | 11 | digits 1-12 read as one integer | 13 |
//! | OGRN-15 | 13 | digits 1-14 read as one integer | 15 |
//! | RS/KS | 10 | weighted sum of BIK prefix + 20 account digits | none, sum must end in 0 |
//!
//! OGRN reduces the leading digits as a single base-10 integer, not as a
//! weighted sum.
//!
//! Every function here expects a code that already passed the length and
//! digit-only checks. A non-digit is reported as
//! [`ContractError::NonDigit`]; an unsupported length is simply `Ok(false)`.

use crate::digits::{
    check_digit, digit_at, integer_remainder, weighted_sum, BANK_ACCOUNT_COEFFICIENTS,
    INN_10_COEFFICIENTS, INN_12_LAST_COEFFICIENTS, INN_12_PENULT_COEFFICIENTS,
};
use crate::error::ContractError;

/// Required leading digits of every correspondent account.
pub const KS_FIRST_DIGITS: &str = "301";

const INN_DIVISOR: u64 = 11;
const OGRN_DIVISOR: u64 = 11;
const OGRNIP_DIVISOR: u64 = 13;

/// Fail on the first character that is not an ASCII digit.
///
/// Once this passes, the code is pure ASCII and byte offsets equal
/// character offsets.
fn ensure_digits(code: &str) -> Result<(), ContractError> {
    match code.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        Some((position, found)) => Err(ContractError::NonDigit { position, found }),
        None => Ok(()),
    }
}

/// The last `n` characters of `s`, or all of `s` when it is shorter.
pub(crate) fn last_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

fn inn_digit_matches(
    inn: &str,
    coefficients: &[u32],
    check_index: usize,
) -> Result<bool, ContractError> {
    let sum = weighted_sum(inn, coefficients)?;
    let expected = check_digit(u64::from(sum) % INN_DIVISOR);
    Ok(digit_at(inn, check_index).is_some_and(|d| d == expected))
}

/// Verify the INN check digit (10 digits) or both check digits (12 digits).
///
/// # Errors
///
/// Returns [`ContractError::NonDigit`] if `inn` contains a non-digit.
pub fn inn_check_ok(inn: &str) -> Result<bool, ContractError> {
    ensure_digits(inn)?;
    match inn.len() {
        10 => inn_digit_matches(inn, &INN_10_COEFFICIENTS, 9),
        12 => Ok(inn_digit_matches(inn, &INN_12_PENULT_COEFFICIENTS, 10)?
            && inn_digit_matches(inn, &INN_12_LAST_COEFFICIENTS, 11)?),
        _ => Ok(false),
    }
}

fn ogrn_digit_matches(ogrn: &str, body_len: usize, divisor: u64) -> Result<bool, ContractError> {
    let remainder = integer_remainder(&ogrn[..body_len], divisor)?;
    let expected = check_digit(remainder);
    Ok(digit_at(ogrn, body_len).is_some_and(|d| d == expected))
}

/// Verify the OGRN (13 digits) or OGRNIP (15 digits) check digit.
///
/// # Errors
///
/// Returns [`ContractError::NonDigit`] if `ogrn` contains a non-digit.
pub fn ogrn_check_ok(ogrn: &str) -> Result<bool, ContractError> {
    ensure_digits(ogrn)?;
    match ogrn.len() {
        13 => ogrn_digit_matches(ogrn, 12, OGRN_DIVISOR),
        15 => ogrn_digit_matches(ogrn, 14, OGRNIP_DIVISOR),
        _ => Ok(false),
    }
}

/// Verify a settlement or correspondent account against its BIK-derived
/// prefix: the weighted sum of `prefix + account` must end in zero.
///
/// Use [`settlement_prefix`] for an RS and [`correspondent_prefix`] for a KS.
///
/// # Errors
///
/// Returns [`ContractError::NonDigit`] if the prefix or account contains a
/// non-digit. Positions in the error count from the start of the prefix.
pub fn bank_account_check_ok(account: &str, prefix: &str) -> Result<bool, ContractError> {
    let combined = format!("{prefix}{account}");
    ensure_digits(&combined)?;
    let sum = weighted_sum(&combined, &BANK_ACCOUNT_COEFFICIENTS)?;
    Ok(sum % 10 == 0)
}

/// Settlement-account prefix: the last three digits of the BIK.
pub fn settlement_prefix(bik: &str) -> &str {
    last_chars(bik, 3)
}

/// Correspondent-account prefix: `0` followed by BIK digits 5 and 6
/// (1-indexed), the pair right after the first four digits.
pub fn correspondent_prefix(bik: &str) -> String {
    std::iter::once('0').chain(bik.chars().skip(4).take(2)).collect()
}

/// Whether the last three characters of `ks` equal those of `bik`.
pub fn ks_last_digits_ok(ks: &str, bik: &str) -> bool {
    last_chars(ks, 3) == last_chars(bik, 3)
}

/// Whether `ks` starts with [`KS_FIRST_DIGITS`].
pub fn ks_first_digits_ok(ks: &str) -> bool {
    ks.starts_with(KS_FIRST_DIGITS)
}
