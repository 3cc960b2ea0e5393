//! # Tagged Diagnostics
//!
//! The same checks as [`validators`](crate::validators), but reporting
//! *which* check failed. Consumers map the returned [`CheckFailure`] to a
//! field-level message instead of re-deriving the order of checks.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. blank
//! 2. length
//! 3. digit-only structure
//! 4. BIK well-formed (accounts only)
//! 5. KS last three digits match the BIK (KS only)
//! 6. KS starts with `301` (KS only)
//! 7. checksum
//!
//! For every input, `check_x(..).is_ok()` equals `is_x_valid(..)`.

use crate::checksum::{
    bank_account_check_ok, correspondent_prefix, inn_check_ok, ks_first_digits_ok,
    ks_last_digits_ok, ogrn_check_ok, settlement_prefix,
};
use crate::error::{CheckFailure, ContractError};
use crate::kind::CodeKind;
use crate::structure::{length_ok, structure_ok};
use crate::validators::is_bik_valid;

/// Blank, length and structure, in that order.
fn check_shape(code: &str, kind: CodeKind) -> Result<(), CheckFailure> {
    if code.is_empty() {
        return Err(CheckFailure::Blank);
    }
    let allowed = kind.lengths();
    if !length_ok(code, &allowed) {
        return Err(CheckFailure::Length {
            expected: allowed,
            actual: code.chars().count(),
        });
    }
    if !structure_ok(code) {
        return Err(CheckFailure::Structure);
    }
    Ok(())
}

/// Map a checksum verdict to a tagged result.
///
/// Shape checks always run first, so a contract error here cannot happen
/// for inputs that reach it; it is still reported as a mismatch rather
/// than accepted.
fn checksum_verdict(
    verdict: Result<bool, ContractError>,
    failure: CheckFailure,
) -> Result<(), CheckFailure> {
    match verdict {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(failure),
    }
}

/// Diagnose an INN.
pub fn check_inn(inn: &str) -> Result<(), CheckFailure> {
    check_shape(inn, CodeKind::Inn)?;
    checksum_verdict(inn_check_ok(inn), CheckFailure::CheckNumber)
}

/// Diagnose a KPP.
pub fn check_kpp(kpp: &str) -> Result<(), CheckFailure> {
    check_shape(kpp, CodeKind::Kpp)
}

/// Diagnose an OGRN or OGRNIP.
pub fn check_ogrn(ogrn: &str) -> Result<(), CheckFailure> {
    check_shape(ogrn, CodeKind::Ogrn)?;
    checksum_verdict(ogrn_check_ok(ogrn), CheckFailure::CheckNumber)
}

/// Diagnose a BIK.
pub fn check_bik(bik: &str) -> Result<(), CheckFailure> {
    check_shape(bik, CodeKind::Bik)
}

/// Diagnose a settlement account against `bik`.
pub fn check_rs(rs: &str, bik: &str) -> Result<(), CheckFailure> {
    check_shape(rs, CodeKind::Rs)?;
    if !is_bik_valid(bik) {
        return Err(CheckFailure::BikInvalid);
    }
    checksum_verdict(
        bank_account_check_ok(rs, settlement_prefix(bik)),
        CheckFailure::BikMismatch,
    )
}

/// Diagnose a correspondent account against `bik`.
pub fn check_ks(ks: &str, bik: &str) -> Result<(), CheckFailure> {
    check_shape(ks, CodeKind::Ks)?;
    if !is_bik_valid(bik) {
        return Err(CheckFailure::BikInvalid);
    }
    if !ks_last_digits_ok(ks, bik) {
        return Err(CheckFailure::KsLastDigits);
    }
    if !ks_first_digits_ok(ks) {
        return Err(CheckFailure::KsFirstDigits);
    }
    checksum_verdict(
        bank_account_check_ok(ks, &correspondent_prefix(bik)),
        CheckFailure::BikMismatch,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::LengthSet;
    use crate::validators::{
        is_inn_valid, is_kpp_valid, is_ks_valid, is_ogrn_valid, is_rs_valid,
    };
    use proptest::prelude::*;

    const BIK: &str = "044525201";
    const RS: &str = "40702810100020002772";
    const KS: &str = "30101810000000000201";

    fn tag(result: Result<(), CheckFailure>) -> &'static str {
        match result {
            Ok(()) => "ok",
            Err(failure) => failure.tag(),
        }
    }

    #[test]
    fn inn_tags() {
        assert_eq!(tag(check_inn("7701992807")), "ok");
        assert_eq!(tag(check_inn("")), "blank");
        assert_eq!(tag(check_inn("77020381501")), "length");
        assert_eq!(tag(check_inn("770203815q")), "structure");
        // Wrong length and wrong structure: length is reported.
        assert_eq!(tag(check_inn("7702038150q")), "length");
        assert_eq!(tag(check_inn("7702038151")), "check_num");
    }

    #[test]
    fn length_failure_carries_counts() {
        assert_eq!(
            check_inn("77020381501"),
            Err(CheckFailure::Length {
                expected: LengthSet::INN,
                actual: 11
            })
        );
    }

    #[test]
    fn length_failures_report_each_kind_table() {
        let too_short = "1";
        let cases = [
            (CodeKind::Inn, check_inn(too_short)),
            (CodeKind::Kpp, check_kpp(too_short)),
            (CodeKind::Ogrn, check_ogrn(too_short)),
            (CodeKind::Bik, check_bik(too_short)),
            (CodeKind::Rs, check_rs(too_short, BIK)),
            (CodeKind::Ks, check_ks(too_short, BIK)),
        ];
        for (kind, result) in cases {
            assert_eq!(
                result,
                Err(CheckFailure::Length {
                    expected: kind.lengths(),
                    actual: 1
                }),
                "{kind}"
            );
        }
    }

    #[test]
    fn kpp_and_bik_tags() {
        assert_eq!(tag(check_kpp("770101001")), "ok");
        assert_eq!(tag(check_kpp("7702010011")), "length");
        assert_eq!(tag(check_kpp("77020100q")), "structure");
        assert_eq!(tag(check_bik(BIK)), "ok");
        assert_eq!(tag(check_bik("04452520")), "length");
        assert_eq!(tag(check_bik("04452520q")), "structure");
    }

    #[test]
    fn ogrn_tags() {
        assert_eq!(tag(check_ogrn("1027700132195")), "ok");
        assert_eq!(tag(check_ogrn("102770013219")), "length");
        assert_eq!(tag(check_ogrn("1027700132194")), "check_num");
    }

    #[test]
    fn rs_tags() {
        assert_eq!(tag(check_rs(RS, BIK)), "ok");
        assert_eq!(tag(check_rs("4070281010002000277", BIK)), "length");
        assert_eq!(tag(check_rs("4070281010002000277q", BIK)), "structure");
        assert_eq!(tag(check_rs("40702810100020002771", BIK)), "check_num_bik");
        assert_eq!(tag(check_rs(RS, "044525200")), "check_num_bik");
        assert_eq!(tag(check_rs(RS, "04452520q")), "bik_invalid");
    }

    #[test]
    fn ks_tags() {
        assert_eq!(tag(check_ks(KS, BIK)), "ok");
        // Nineteen digits: length wins over the last-three mismatch.
        assert_eq!(tag(check_ks("3010181000000000020", BIK)), "length");
        assert_eq!(tag(check_ks("3010181000000000020q", BIK)), "structure");
        assert_eq!(tag(check_ks("30101810000000000200", BIK)), "ks_last_3");
        assert_eq!(tag(check_ks("30001810000000000201", BIK)), "ks_first_3");
        assert_eq!(tag(check_ks("30101810000000001201", BIK)), "check_num_bik");
        assert_eq!(tag(check_ks(KS, "044526201")), "check_num_bik");
        assert_eq!(tag(check_ks(KS, "")), "bik_invalid");
    }

    proptest! {
        #[test]
        fn diagnostics_agree_with_validators(code in "[0-9a]{0,21}", bik in "[0-9]{8,9}") {
            prop_assert_eq!(check_inn(&code).is_ok(), is_inn_valid(&code));
            prop_assert_eq!(check_kpp(&code).is_ok(), is_kpp_valid(&code));
            prop_assert_eq!(check_ogrn(&code).is_ok(), is_ogrn_valid(&code));
            prop_assert_eq!(check_rs(&code, &bik).is_ok(), is_rs_valid(&code, &bik));
            prop_assert_eq!(check_ks(&code, &bik).is_ok(), is_ks_valid(&code, &bik));
        }

        #[test]
        fn ks_agreement_near_valid_accounts(tail in "[0-9]{14}", bik in "0445[0-9]{5}") {
            let last3 = &bik[6..];
            let ks = format!("301{tail}{last3}");
            prop_assert_eq!(check_ks(&ks, &bik).is_ok(), is_ks_valid(&ks, &bik));
        }
    }
}
