//! Currency pair parsing and pip conventions

use crate::error::CalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pip size for most pairs
pub const STANDARD_PIP: Decimal = dec!(0.0001);
/// Pip size for JPY-quoted pairs
pub const JPY_PIP: Decimal = dec!(0.01);

/// A forex pair such as EUR/USD
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CurrencyPair {
    /// Base currency (the one being bought or sold)
    pub base: String,
    /// Quote currency (the one prices are expressed in)
    pub quote: String,
}

impl CurrencyPair {
    /// Create a pair from two ISO currency codes
    pub fn new(base: &str, quote: &str) -> Result<Self, CalcError> {
        Ok(Self {
            base: currency_code("pair", base)?,
            quote: currency_code("pair", quote)?,
        })
    }

    /// Whether the pair is quoted in Japanese yen
    pub fn is_jpy_quoted(&self) -> bool {
        self.quote == "JPY"
    }

    /// Price increment of one pip
    pub fn pip_size(&self) -> Decimal {
        if self.is_jpy_quoted() {
            JPY_PIP
        } else {
            STANDARD_PIP
        }
    }
}

/// Normalize and check a three-letter currency code
pub fn currency_code(field: &'static str, code: &str) -> Result<String, CalcError> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CalcError::invalid(
            field,
            format!("'{code}' is not a three-letter currency code"),
        ));
    }
    Ok(code.to_ascii_uppercase())
}

impl FromStr for CurrencyPair {
    type Err = CalcError;

    /// Accepts `EUR/USD`, `EURUSD`, `eur-usd` and `EUR_USD`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(['/', '-', '_']).collect();
        match parts.as_slice() {
            [base, quote] => Self::new(base, quote),
            [joined] if joined.len() == 6 && joined.is_ascii() => {
                Self::new(&joined[..3], &joined[3..])
            }
            _ => Err(CalcError::invalid(
                "pair",
                format!("'{s}' is not a currency pair like EUR/USD"),
            )),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
