//! Input validation
//!
//! Every calculator validates its inputs before any formula runs. Checks never
//! adjust a value: the first failing check is returned as a `CalcError` naming the
//! offending field.

use crate::error::CalcError;
use crate::types::Instrument;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::ops::Deref;

/// Largest accepted money or price input
pub const MAX_MAGNITUDE: Decimal = dec!(1000000000000000);

/// Implemented by every parameter struct the engine accepts
pub trait Validate: Sized {
    /// Run all checks, returning the first violation
    fn check(&self) -> Result<(), CalcError>;

    /// Consume the value and wrap it as validated
    fn validate(self) -> Result<Validated<Self>, CalcError> {
        self.check()?;
        Ok(Validated(self))
    }
}

/// A value that has passed [`Validate::check`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    /// Unwrap the validated value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Reject NaN and infinities
pub fn finite(field: &'static str, value: f64) -> Result<f64, CalcError> {
    if value.is_nan() {
        return Err(CalcError::invalid(field, "must be a number, got NaN"));
    }
    if value.is_infinite() {
        return Err(CalcError::invalid(field, "must be finite"));
    }
    Ok(value)
}

/// Convert a caller-supplied float into a Decimal, rejecting non-finite values
pub fn decimal_from_f64(field: &'static str, value: f64) -> Result<Decimal, CalcError> {
    let value = finite(field, value)?;
    Decimal::try_from(value)
        .map_err(|_| CalcError::invalid(field, format!("{value} cannot be represented exactly")))
}

/// Strictly positive and below [`MAX_MAGNITUDE`]
pub fn positive(field: &'static str, value: Decimal) -> Result<Decimal, CalcError> {
    if value <= Decimal::ZERO {
        return Err(CalcError::invalid(
            field,
            format!("must be greater than zero, got {value}"),
        ));
    }
    within_magnitude(field, value)
}

/// Zero or positive and below [`MAX_MAGNITUDE`]
pub fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, CalcError> {
    if value < Decimal::ZERO {
        return Err(CalcError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    within_magnitude(field, value)
}

/// Reject values above [`MAX_MAGNITUDE`]
pub fn within_magnitude(field: &'static str, value: Decimal) -> Result<Decimal, CalcError> {
    if value > MAX_MAGNITUDE {
        return Err(CalcError::invalid(
            field,
            format!("{value} exceeds the supported maximum of {MAX_MAGNITUDE}"),
        ));
    }
    Ok(value)
}

/// Strictly positive `f64`
pub fn positive_f64(field: &'static str, value: f64) -> Result<f64, CalcError> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid(
            field,
            format!("must be greater than zero, got {value}"),
        ));
    }
    Ok(value)
}

/// Percentage in `(0, 100]`
pub fn percentage(field: &'static str, value: Decimal) -> Result<Decimal, CalcError> {
    if value <= Decimal::ZERO || value > dec!(100) {
        return Err(CalcError::invalid(
            field,
            format!("must be within (0, 100], got {value}"),
        ));
    }
    Ok(value)
}

/// Fraction in `[0, 1)`
pub fn rate(field: &'static str, value: Decimal) -> Result<Decimal, CalcError> {
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(CalcError::invalid(
            field,
            format!("must be within [0, 1), got {value}"),
        ));
    }
    Ok(value)
}

/// Leverage within the instrument's bounds; `max = None` means no upper cap
pub fn leverage(
    instrument: Instrument,
    value: Decimal,
    min: Decimal,
    max: Option<Decimal>,
) -> Result<Decimal, CalcError> {
    let above_max = max.is_some_and(|max| value > max);
    if value < min || above_max {
        return Err(CalcError::LeverageOutOfBounds {
            instrument,
            provided: value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Distance between entry and stop, failing when they coincide
pub fn stop_distance(entry_price: Decimal, stop_price: Decimal) -> Result<Decimal, CalcError> {
    if entry_price == stop_price {
        return Err(CalcError::DivisionByZero {
            what: "entry price equals stop-loss price",
        });
    }
    Ok((entry_price - stop_price).abs())
}
