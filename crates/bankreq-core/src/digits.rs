//! # Digit-Sum Engine
//!
//! The shared arithmetic behind every checksum: weighted digit sums against
//! fixed coefficient tables, the integer remainder used by OGRN, and the
//! rule that reduces a remainder to a single check digit.
//!
//! All coefficient tables are module-level constants. Nothing here holds
//! state, so every function is safe to call from any number of threads.

use crate::error::ContractError;

/// INN-10 weights over the first nine digits.
pub const INN_10_COEFFICIENTS: [u32; 9] = [2, 4, 10, 3, 5, 9, 4, 6, 8];

/// INN-12 weights over the first ten digits, producing digit 11.
pub const INN_12_PENULT_COEFFICIENTS: [u32; 10] = [7, 2, 4, 10, 3, 5, 9, 4, 6, 8];

/// INN-12 weights over the first eleven digits, producing digit 12.
pub const INN_12_LAST_COEFFICIENTS: [u32; 11] = [3, 7, 2, 4, 10, 3, 5, 9, 4, 6, 8];

/// Bank-account weights over a 3-digit BIK prefix followed by the 20-digit account.
pub const BANK_ACCOUNT_COEFFICIENTS: [u32; 23] = [
    7, 1, 3, 7, 1, 3, 7, 1, 3, 7, 1, 3, 7, 1, 3, 7, 1, 3, 7, 1, 3, 7, 1,
];

/// Numeric value of an ASCII digit at `position`.
fn digit_value(position: usize, c: char) -> Result<u32, ContractError> {
    if c.is_ascii_digit() {
        Ok(u32::from(c as u8 - b'0'))
    } else {
        Err(ContractError::NonDigit { position, found: c })
    }
}

/// Sum of `digit * coefficient` over the pairs of `code` and `coefficients`.
///
/// Pairs are taken positionally and stop at the shorter of the two
/// sequences: digits beyond the table are ignored, as are coefficients
/// beyond the code.
///
/// # Errors
///
/// Returns [`ContractError::NonDigit`] if a paired character is not an
/// ASCII digit. Callers are expected to have run
/// [`structure_ok`](crate::structure::structure_ok) first.
///
/// Returns [`ContractError::Overflow`] if the sum does not fit in `u32`.
/// The built-in tables stay far below that bound.
pub fn weighted_sum(code: &str, coefficients: &[u32]) -> Result<u32, ContractError> {
    code.chars()
        .zip(coefficients)
        .enumerate()
        .try_fold(0u32, |acc, (position, (c, coef))| -> Result<u32, ContractError> {
            digit_value(position, c)?
                .checked_mul(*coef)
                .and_then(|term| acc.checked_add(term))
                .ok_or(ContractError::Overflow { position })
        })
}

/// Remainder of `digits`, read as one base-10 integer, divided by `divisor`.
///
/// The remainder is folded digit by digit in 128-bit arithmetic, so the
/// result equals `int(digits) % divisor` for any number of digits and any
/// divisor without overflow.
///
/// # Errors
///
/// Returns [`ContractError::ZeroDivisor`] if `divisor` is zero, and
/// [`ContractError::NonDigit`] on the first non-digit character.
pub fn integer_remainder(digits: &str, divisor: u64) -> Result<u64, ContractError> {
    if divisor == 0 {
        return Err(ContractError::ZeroDivisor);
    }
    let divisor = u128::from(divisor);
    let remainder = digits
        .chars()
        .enumerate()
        .try_fold(0u128, |acc, (position, c)| -> Result<u128, ContractError> {
            Ok((acc * 10 + u128::from(digit_value(position, c)?)) % divisor)
        })?;
    // Below `divisor`, which came from a u64.
    Ok(remainder as u64)
}

/// Reduce a remainder to a single check digit: the remainder itself when
/// below ten, otherwise its last decimal digit.
pub fn check_digit(remainder: u64) -> u32 {
    // `remainder % 10` is below ten, so the narrowing is lossless.
    (remainder % 10) as u32
}

/// Value of the ASCII digit at byte index `index` of `code`, if present.
pub(crate) fn digit_at(code: &str, index: usize) -> Option<u32> {
    code.as_bytes()
        .get(index)
        .filter(|b| b.is_ascii_digit())
        .map(|b| u32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn weighted_sum_inn_10_example() {
        // 7*2 + 7*4 + 0*10 + 2*3 + 0*5 + 3*9 + 8*4 + 1*6 + 5*8
        assert_eq!(weighted_sum("7702038150", &INN_10_COEFFICIENTS), Ok(153));
    }

    #[test]
    fn weighted_sum_truncates_to_shorter_sequence() {
        assert_eq!(weighted_sum("99999", &[1, 1]), Ok(18));
        assert_eq!(weighted_sum("12", &[1, 10, 100]), Ok(21));
        assert_eq!(weighted_sum("", &INN_10_COEFFICIENTS), Ok(0));
    }

    #[test]
    fn weighted_sum_ignores_unpaired_non_digits() {
        // The trailing 'x' sits past the end of the table.
        assert_eq!(weighted_sum("11x", &[1, 1]), Ok(2));
    }

    #[test]
    fn weighted_sum_reports_non_digit() {
        assert_eq!(
            weighted_sum("12a4", &[1, 1, 1, 1]),
            Err(ContractError::NonDigit {
                position: 2,
                found: 'a'
            })
        );
        assert!(weighted_sum("1\u{0662}", &[1, 1]).is_err());
    }

    #[test]
    fn integer_remainder_matches_native_modulo() {
        assert_eq!(integer_remainder("102770013219", 11), Ok(102_770_013_219 % 11));
        assert_eq!(
            integer_remainder("30450011600015", 13),
            Ok(30_450_011_600_015 % 13)
        );
        assert_eq!(integer_remainder("", 11), Ok(0));
    }

    #[test]
    fn weighted_sum_large_coefficient_is_overflow() {
        assert_eq!(
            weighted_sum("99", &[u32::MAX, 1]),
            Err(ContractError::Overflow { position: 0 })
        );
        assert_eq!(
            weighted_sum("19", &[u32::MAX, 1]),
            Err(ContractError::Overflow { position: 1 })
        );
        assert_eq!(weighted_sum("10", &[u32::MAX, 1]), Ok(u32::MAX));
    }

    #[test]
    fn weighted_sum_accumulated_overflow() {
        // Every term fits; the running total passes u32::MAX at the fifth.
        let coefficients = [900_000_000u32; 6];
        assert_eq!(weighted_sum("1111", &coefficients), Ok(3_600_000_000));
        assert_eq!(
            weighted_sum("111111", &coefficients),
            Err(ContractError::Overflow { position: 4 })
        );
    }

    #[test]
    fn integer_remainder_zero_divisor_is_contract_error() {
        assert_eq!(integer_remainder("12", 0), Err(ContractError::ZeroDivisor));
        assert_eq!(integer_remainder("", 0), Err(ContractError::ZeroDivisor));
    }

    #[test]
    fn integer_remainder_huge_divisor() {
        let max = u64::MAX;
        assert_eq!(integer_remainder(&(max - 1).to_string(), max), Ok(max - 1));
        assert_eq!(integer_remainder(&max.to_string(), max), Ok(0));
        // 10^20 = 5 * (2^64 - 1) + 7766279631452241925.
        assert_eq!(
            integer_remainder("100000000000000000000", max),
            Ok(7_766_279_631_452_241_925)
        );
    }

    #[test]
    fn integer_remainder_reports_non_digit() {
        assert!(matches!(
            integer_remainder("12 4", 11),
            Err(ContractError::NonDigit { position: 1, .. })
        ));
    }

    #[test]
    fn check_digit_takes_last_decimal_digit() {
        assert_eq!(check_digit(0), 0);
        assert_eq!(check_digit(9), 9);
        assert_eq!(check_digit(10), 0);
        assert_eq!(check_digit(12), 2);
    }

    #[test]
    fn digit_at_bounds() {
        assert_eq!(digit_at("305", 0), Some(3));
        assert_eq!(digit_at("305", 2), Some(5));
        assert_eq!(digit_at("305", 3), None);
        assert_eq!(digit_at("3x5", 1), None);
    }

    proptest! {
        #[test]
        fn weighted_sum_is_deterministic(code in "[0-9]{0,30}") {
            let a = weighted_sum(&code, &BANK_ACCOUNT_COEFFICIENTS);
            let b = weighted_sum(&code, &BANK_ACCOUNT_COEFFICIENTS);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn weighted_sum_pairs_up_to_shorter_sequence(
            code in "[0-9]{0,30}",
            coefficients in proptest::collection::vec(0u32..1_000, 0..30),
        ) {
            let pairs = code.len().min(coefficients.len());
            let expected: u32 = code
                .bytes()
                .zip(&coefficients)
                .map(|(b, coef)| u32::from(b - b'0') * coef)
                .sum();
            prop_assert_eq!(weighted_sum(&code, &coefficients), Ok(expected));
            prop_assert_eq!(
                weighted_sum(&code[..pairs], &coefficients[..pairs]),
                Ok(expected)
            );
        }

        #[test]
        fn weighted_sum_never_panics(
            code in "[0-9]{0,30}",
            coefficients in proptest::collection::vec(any::<u32>(), 0..30),
        ) {
            let wide: u64 = code
                .bytes()
                .zip(&coefficients)
                .map(|(b, coef)| u64::from(b - b'0') * u64::from(*coef))
                .sum();
            match weighted_sum(&code, &coefficients) {
                Ok(sum) => prop_assert_eq!(u64::from(sum), wide),
                Err(err) => {
                    let is_overflow = matches!(err, ContractError::Overflow { .. });
                    prop_assert!(is_overflow);
                    prop_assert!(wide > u64::from(u32::MAX));
                }
            }
        }

        #[test]
        fn integer_remainder_agrees_with_u64(n in 0u64..100_000_000_000_000) {
            prop_assert_eq!(integer_remainder(&n.to_string(), 13), Ok(n % 13));
            prop_assert_eq!(integer_remainder(&n.to_string(), 11), Ok(n % 11));
        }
    }
}
