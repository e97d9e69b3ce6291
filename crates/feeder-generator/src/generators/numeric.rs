//! Numeric value generators.

use rand::Rng;
use rust_decimal::Decimal;

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.gen_range(min..=max)
}

/// Generate a random decimal in the given range (inclusive) with `scale`
/// fractional digits.
pub fn generate_decimal_range<R: Rng>(rng: &mut R, min: i64, max: i64, scale: u32) -> Decimal {
    let factor = 10i64.pow(scale);
    let mantissa = rng.gen_range(min * factor..=max * factor);
    Decimal::new(mantissa, scale)
}
