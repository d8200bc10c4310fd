//! Money helpers using rust_decimal for precision
//!
//! All billing arithmetic is done in `Decimal` internally, then converted
//! to `f64` for storage/serialization.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal, treating non-finite values as zero
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
}

/// Convert Decimal back to f64, rounded to 2 places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round a Decimal to monetary precision
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Leniently parse an operator-typed amount string.
///
/// Unparsable, non-finite or empty input yields zero instead of an error:
/// checkout must stay usable when a row of the manual charge grid is
/// half-filled.
pub fn parse_amount(raw: &str) -> Decimal {
    Decimal::from_str_exact(raw.trim()).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_valid() {
        assert_eq!(parse_amount("250"), Decimal::new(250, 0));
        assert_eq!(parse_amount(" 99.50 "), Decimal::new(9950, 2));
        assert_eq!(parse_amount("0.01"), Decimal::new(1, 2));
    }

    #[test]
    fn test_parse_amount_lenient() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount("12,50"), Decimal::ZERO);
        assert_eq!(parse_amount("--5"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_negative_passes_through() {
        // Validity (positive-only) is the caller's rule, not the parser's
        assert_eq!(parse_amount("-5"), Decimal::new(-5, 0));
    }

    #[test]
    fn test_to_decimal_non_finite() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(to_f64(Decimal::from_str_exact("10.005").unwrap()), 10.01);
        assert_eq!(to_f64(Decimal::from_str_exact("10.004").unwrap()), 10.0);
    }
}
