//! Shorthand amount notation
//!
//! Grammar: `digits ['.' digits] [k | m | b | kk]`, case-insensitive, surrounding
//! whitespace ignored. `kk` is a million, the same as `m`. Nothing is guessed:
//! anything outside the grammar is an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use thiserror::Error;

/// Errors from [`parse_amount`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("amount is empty")]
    Empty,

    #[error("unexpected character '{found}' at position {position} in '{input}'")]
    UnexpectedChar {
        input: String,
        found: char,
        position: usize,
    },

    #[error("'{0}' has no digits")]
    MissingDigits(String),

    #[error("unknown suffix '{suffix}' in '{input}'; expected k, m, b or kk")]
    UnknownSuffix { input: String, suffix: String },

    #[error("'{0}' is too large")]
    Overflow(String),
}

fn multiplier(suffix: &str) -> Option<Decimal> {
    match suffix {
        "" => Some(Decimal::ONE),
        "k" => Some(dec!(1000)),
        "m" | "kk" => Some(dec!(1000000)),
        "b" => Some(dec!(1000000000)),
        _ => None,
    }
}

/// Parse `1.5k`, `2m`, `1kk`, `250` into a Decimal
pub fn parse_amount(input: &str) -> Result<Decimal, AmountParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountParseError::Empty);
    }
    let lowered = trimmed.to_ascii_lowercase();

    let number_end = lowered
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(lowered.len());
    let (number, suffix) = lowered.split_at(number_end);

    if let Some((position, found)) = suffix
        .char_indices()
        .find(|(_, c)| !c.is_ascii_alphabetic())
    {
        return Err(AmountParseError::UnexpectedChar {
            input: trimmed.to_string(),
            found,
            position: number_end + position,
        });
    }
    let scale = multiplier(suffix).ok_or_else(|| AmountParseError::UnknownSuffix {
        input: trimmed.to_string(),
        suffix: suffix.to_string(),
    })?;

    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (number, None),
    };
    if whole.is_empty() {
        return Err(AmountParseError::MissingDigits(trimmed.to_string()));
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() {
            return Err(AmountParseError::MissingDigits(trimmed.to_string()));
        }
        if let Some(position) = fraction.find('.') {
            return Err(AmountParseError::UnexpectedChar {
                input: trimmed.to_string(),
                found: '.',
                position: whole.len() + 1 + position,
            });
        }
    }

    let value = Decimal::from_str(number)
        .map_err(|_| AmountParseError::Overflow(trimmed.to_string()))?;
    value
        .checked_mul(scale)
        .map(|amount| amount.normalize())
        .ok_or_else(|| AmountParseError::Overflow(trimmed.to_string()))
}
