//! Decimal money helpers.
//!
//! Share fractions stay exact (`Frac`); money is `rust_decimal::Decimal`,
//! derived from the final fractions and rounded half-even only for display.

pub use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::errors::CoreError;
use crate::frac::Frac;

/// Exact-fraction → Decimal conversion (lossy only past Decimal's 28 digits).
pub fn frac_to_decimal(f: Frac) -> Result<Decimal, CoreError> {
    let num = Decimal::try_from_i128_with_scale(f.num, 0)
        .map_err(|_| CoreError::Overflow("frac numerator to decimal"))?;
    let den = Decimal::try_from_i128_with_scale(f.den, 0)
        .map_err(|_| CoreError::Overflow("frac denominator to decimal"))?;
    num.checked_div(den).ok_or(CoreError::Overflow("frac to decimal"))
}

/// Monetary amount for a fraction of the estate.
pub fn amount_of(estate: Decimal, f: Frac) -> Result<Decimal, CoreError> {
    estate
        .checked_mul(frac_to_decimal(f)?)
        .ok_or(CoreError::Overflow("amount of estate"))
}

/// Round for display (banker's rounding, `dp` decimal places).
pub fn round_display(d: Decimal, dp: u8) -> Decimal {
    d.round_dp_with_strategy(dp as u32, RoundingStrategy::MidpointNearestEven)
}
