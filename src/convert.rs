//! Fixed-point value conversion
//!
//! The invest API encodes money and quantity values as (units, nano) pairs
//! where nano holds billionths and mirrors the sign of units. Conversion
//! goes through `Decimal` to stay exact before narrowing to a float for
//! tabular display.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Convert a (units, nano) pair into an exact decimal value.
pub fn quotation_to_decimal(units: i64, nano: i32) -> Decimal {
    Decimal::from(units) + Decimal::new(nano as i64, 9)
}

/// Convert a (units, nano) pair into a float for tabular display.
pub fn quotation_to_f64(units: i64, nano: i32) -> f64 {
    quotation_to_decimal(units, nano).to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_pair() {
        assert_eq!(quotation_to_decimal(114, 250_000_000), dec!(114.25));
        assert_eq!(quotation_to_decimal(0, 500_000_000), dec!(0.5));
    }

    #[test]
    fn test_negative_pair_preserves_sign() {
        // The API mirrors the units sign on nano
        assert_eq!(quotation_to_decimal(-1, -250_000_000), dec!(-1.25));
        assert_eq!(quotation_to_decimal(0, -500_000_000), dec!(-0.5));
        assert_eq!(quotation_to_decimal(-10, 0), dec!(-10));
    }

    #[test]
    fn test_zero() {
        assert_eq!(quotation_to_decimal(0, 0), Decimal::ZERO);
        assert_eq!(quotation_to_f64(0, 0), 0.0);
    }

    #[test]
    fn test_nano_bounds() {
        assert_eq!(quotation_to_decimal(1, 999_999_999), dec!(1.999999999));
        assert_eq!(quotation_to_decimal(-1, -999_999_999), dec!(-1.999999999));
    }

    #[test]
    fn test_f64_within_tolerance() {
        let cases: [(i64, i32); 5] = [
            (114, 250_000_000),
            (-1, -999_999_999),
            (0, 1),
            (1_000_000, 123_456_789),
            (-42, -1),
        ];
        for (units, nano) in cases {
            let expected = units as f64 + nano as f64 / 1e9;
            assert!(
                (quotation_to_f64(units, nano) - expected).abs() < 1e-9,
                "mismatch for ({}, {})",
                units,
                nano
            );
        }
    }
}
