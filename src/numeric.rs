//! Checked arithmetic and float/decimal conversions
//!
//! Formulas route their divisions and multiplications through these helpers so a
//! zero divisor surfaces as `DivisionByZero` and an overflow surfaces as
//! `InternalCalculation` instead of a panic or a non-finite number.

use crate::error::CalcError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Divide, failing on a zero divisor or overflow
pub fn checked_div(
    numerator: Decimal,
    divisor: Decimal,
    what: &'static str,
) -> Result<Decimal, CalcError> {
    if divisor.is_zero() {
        return Err(CalcError::DivisionByZero { what });
    }
    numerator
        .checked_div(divisor)
        .ok_or_else(|| internal_error(what))
}

/// Multiply, failing on overflow
pub fn checked_mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, CalcError> {
    a.checked_mul(b).ok_or_else(|| internal_error(what))
}

/// Build an `InternalCalculation` error and log it.
///
/// Reaching this means validated input still produced an unrepresentable value.
pub fn internal_error(context: &'static str) -> CalcError {
    tracing::error!(context, "calculation produced a non-representable value");
    CalcError::InternalCalculation { context }
}

/// Guard an `f64` result before it leaves the engine
pub fn ensure_finite(value: f64, context: &'static str) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(internal_error(context))
    }
}

/// Convert a finite `f64` result into a Decimal
pub fn to_decimal(value: f64, context: &'static str) -> Result<Decimal, CalcError> {
    let value = ensure_finite(value, context)?;
    Decimal::try_from(value).map_err(|_| internal_error(context))
}

/// Convert a Decimal into `f64` for transcendental math
pub fn to_f64(value: Decimal, context: &'static str) -> Result<f64, CalcError> {
    f64::try_from(value).map_err(|_| internal_error(context))
}

/// Round a positive quantity down to a multiple of `step`
pub fn floor_to_step(
    value: Decimal,
    step: Decimal,
    what: &'static str,
) -> Result<Decimal, CalcError> {
    let steps = checked_div(value, step, what)?.floor();
    checked_mul(steps, step, what)
}

/// Truncate to `dp` decimal places, never rounding away from zero
pub fn truncate_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::ToZero)
}
