//! Calculation errors shared by every instrument calculator

use crate::types::Instrument;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors returned by the engine.
///
/// Every expected domain violation is returned through this type; nothing in the
/// engine substitutes a fallback value for a failed calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Non-finite, out-of-range or otherwise unusable input
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Leverage outside the instrument's allowed range
    #[error("{}", leverage_message(.instrument, .provided, .min, .max))]
    LeverageOutOfBounds {
        instrument: Instrument,
        provided: Decimal,
        min: Decimal,
        max: Option<Decimal>,
    },

    /// Risk-based size rounds below the smallest tradable lot
    #[error("position size of {computed} lots is below the minimum tradable size of {minimum} lots; increase the balance, the risk percentage or tighten the stop")]
    InsufficientAccountSize { computed: Decimal, minimum: Decimal },

    /// Risk-based contract count rounds down to zero
    #[error("risk budget covers only {raw_contracts} contracts; at least 1 whole contract is required")]
    PositionTooSmall { raw_contracts: Decimal },

    /// Requested risk needs more notional than the leverage ceiling allows
    #[error("position needs {required_notional} notional but balance x leverage only allows {available_notional}")]
    LeverageInsufficient {
        required_notional: Decimal,
        available_notional: Decimal,
    },

    /// A divisor was zero (entry equals stop, zero ATR, zero deviation)
    #[error("division by zero: {what}")]
    DivisionByZero { what: &'static str },

    /// A formula produced a non-representable value despite validated input
    #[error("internal calculation error in {context}")]
    InternalCalculation { context: &'static str },
}

impl CalcError {
    /// Shorthand for an `InvalidInput` error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, when the error refers to one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            Self::LeverageOutOfBounds { .. } => Some("leverage"),
            _ => None,
        }
    }

    /// Short machine-friendly label, used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::LeverageOutOfBounds { .. } => "leverage_out_of_bounds",
            Self::InsufficientAccountSize { .. } => "insufficient_account_size",
            Self::PositionTooSmall { .. } => "position_too_small",
            Self::LeverageInsufficient { .. } => "leverage_insufficient",
            Self::DivisionByZero { .. } => "division_by_zero",
            Self::InternalCalculation { .. } => "internal_calculation",
        }
    }
}

fn leverage_message(
    instrument: &Instrument,
    provided: &Decimal,
    min: &Decimal,
    max: &Option<Decimal>,
) -> String {
    match max {
        Some(max) if provided > max => format!(
            "leverage {}x exceeds the {}x maximum for {}",
            provided.normalize(),
            max.normalize(),
            instrument
        ),
        _ => format!(
            "leverage {}x is below the {}x minimum for {}",
            provided.normalize(),
            min.normalize(),
            instrument
        ),
    }
}
