//! # Composite Validators
//!
//! One pass/fail verdict per requisite. Each validator runs the structural
//! checks first and short-circuits, so the checksum functions only ever see
//! codes of the right length made of ASCII digits.
//!
//! Account validators take the BIK explicitly and fail closed when the BIK
//! itself is malformed.

use crate::checksum::{
    bank_account_check_ok, correspondent_prefix, inn_check_ok, ks_first_digits_ok,
    ks_last_digits_ok, ogrn_check_ok, settlement_prefix,
};
use crate::kind::CodeKind;
use crate::structure::{length_ok, structure_ok};

/// INN: 10 or 12 digits with valid check digit(s).
pub fn is_inn_valid(inn: &str) -> bool {
    length_ok(inn, &CodeKind::Inn.lengths())
        && structure_ok(inn)
        && inn_check_ok(inn) == Ok(true)
}

/// KPP: 9 digits. KPP carries no check digit.
pub fn is_kpp_valid(kpp: &str) -> bool {
    length_ok(kpp, &CodeKind::Kpp.lengths()) && structure_ok(kpp)
}

/// OGRN: 13 digits (legal entity) or 15 digits (OGRNIP) with a valid check digit.
pub fn is_ogrn_valid(ogrn: &str) -> bool {
    length_ok(ogrn, &CodeKind::Ogrn.lengths())
        && structure_ok(ogrn)
        && ogrn_check_ok(ogrn) == Ok(true)
}

/// BIK: 9 digits.
pub fn is_bik_valid(bik: &str) -> bool {
    length_ok(bik, &CodeKind::Bik.lengths()) && structure_ok(bik)
}

/// Settlement account: 20 digits whose checksum holds against the last
/// three digits of `bik`.
pub fn is_rs_valid(rs: &str, bik: &str) -> bool {
    if !is_bik_valid(bik) {
        return false;
    }
    length_ok(rs, &CodeKind::Rs.lengths())
        && structure_ok(rs)
        && bank_account_check_ok(rs, settlement_prefix(bik)) == Ok(true)
}

/// Correspondent account: 20 digits starting with `301`, ending in the
/// last three digits of `bik`, whose checksum holds against `0` followed
/// by BIK digits 5 and 6.
pub fn is_ks_valid(ks: &str, bik: &str) -> bool {
    if !is_bik_valid(bik) || !ks_last_digits_ok(ks, bik) || !ks_first_digits_ok(ks) {
        return false;
    }
    length_ok(ks, &CodeKind::Ks.lengths())
        && structure_ok(ks)
        && bank_account_check_ok(ks, &correspondent_prefix(bik)) == Ok(true)
}
