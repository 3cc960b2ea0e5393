//! # bankreq-core — Russian Bank Requisite Validation
//!
//! Stateless verification of Russian organization and bank identification
//! codes: INN, KPP, OGRN, BIK, settlement accounts (RS) and correspondent
//! accounts (KS).
//!
//! ## Layers
//!
//! 1. **Digit-sum engine** ([`digits`]): weighted sums against fixed
//!    coefficient tables, and the remainder-to-check-digit rule.
//! 2. **Structural validators** ([`structure`]): permitted lengths and
//!    ASCII-digit-only content.
//! 3. **Checksum validators** ([`checksum`]): INN, OGRN and bank-account
//!    check digits, and the KS/BIK positional rules.
//! 4. **Composite validators** ([`validators`]): one boolean per code kind,
//!    structural checks first, then checksums.
//!
//! On top of the core sit [`diagnose`] (which check failed), the validated
//! newtypes in [`identity`], and whole-record validation in [`requisites`].
//!
//! ## Crate Policy
//!
//! - Every function is pure: no I/O, no shared mutable state, safe to call
//!   from any thread.
//! - Bad input data yields `false` or a [`CheckFailure`], never a panic.
//!   Only caller contract violations produce a [`ContractError`].
//! - No `unsafe` code. No `.unwrap()` outside tests.

#![deny(missing_docs)]

pub mod checksum;
pub mod diagnose;
pub mod digits;
pub mod error;
pub mod identity;
pub mod kind;
pub mod policy;
pub mod requisites;
pub mod structure;
pub mod validators;

// Re-export primary types for ergonomic imports.
pub use diagnose::{check_bik, check_inn, check_kpp, check_ks, check_ogrn, check_rs};
pub use digits::weighted_sum;
pub use error::{BankreqError, CheckFailure, ContractError, ValidationError};
pub use identity::{Bik, CorrespondentAccount, HolderKind, Inn, Kpp, Ogrn, SettlementAccount};
pub use kind::CodeKind;
pub use policy::ValidationPolicy;
pub use requisites::{BankDetails, Field, FieldError, FieldErrors, VerifiedBankDetails};
pub use structure::{length_ok, structure_ok, LengthSet};
pub use validators::{
    is_bik_valid, is_inn_valid, is_kpp_valid, is_ks_valid, is_ogrn_valid, is_rs_valid,
};

/// Diagnose `code` as a `kind` requisite.
///
/// `bik` is consulted only for [`CodeKind::Rs`] and [`CodeKind::Ks`]; an
/// account checked without one is reported as [`CheckFailure::BikInvalid`].
pub fn check(kind: CodeKind, code: &str, bik: Option<&str>) -> Result<(), CheckFailure> {
    match kind {
        CodeKind::Inn => check_inn(code),
        CodeKind::Kpp => check_kpp(code),
        CodeKind::Ogrn => check_ogrn(code),
        CodeKind::Bik => check_bik(code),
        CodeKind::Rs => check_rs(code, bik.unwrap_or_default()),
        CodeKind::Ks => check_ks(code, bik.unwrap_or_default()),
    }
}

/// Boolean verdict for `code` as a `kind` requisite. See [`check`].
pub fn is_valid(kind: CodeKind, code: &str, bik: Option<&str>) -> bool {
    match kind {
        CodeKind::Inn => is_inn_valid(code),
        CodeKind::Kpp => is_kpp_valid(code),
        CodeKind::Ogrn => is_ogrn_valid(code),
        CodeKind::Bik => is_bik_valid(code),
        CodeKind::Rs => is_rs_valid(code, bik.unwrap_or_default()),
        CodeKind::Ks => is_ks_valid(code, bik.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_direct_calls() {
        let bik = Some("044525219");
        assert!(is_valid(CodeKind::Inn, "7702038150", None));
        assert!(is_valid(CodeKind::Rs, "40602810900070000003", bik));
        assert!(is_valid(CodeKind::Ks, "30101810500000000219", bik));
        assert_eq!(check(CodeKind::Ogrn, "1027700132194", None), Err(CheckFailure::CheckNumber));
    }

    #[test]
    fn account_without_bik_fails_closed() {
        assert!(!is_valid(CodeKind::Rs, "40602810900070000003", None));
        assert_eq!(
            check(CodeKind::Ks, "30101810500000000219", None),
            Err(CheckFailure::BikInvalid)
        );
    }

    #[test]
    fn dispatch_agrees_for_every_kind() {
        for kind in CodeKind::all() {
            for code in ["", "7702038150", "044525219", "40602810900070000003"] {
                let bik = Some("044525219");
                assert_eq!(check(*kind, code, bik).is_ok(), is_valid(*kind, code, bik));
            }
        }
    }
}
