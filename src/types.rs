//! Value types shared across the calculators

use crate::error::CalcError;
use crate::numeric;
use crate::validation::{self, Validate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instrument class handled by a calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Forex,
    Crypto,
    Options,
    Futures,
}

impl Instrument {
    /// Stable lowercase label for metrics and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Options => "options",
            Self::Futures => "futures",
        }
    }
}

/// Human-readable name used in error messages and reports
impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Forex => "forex",
            Self::Crypto => "crypto futures",
            Self::Options => "options",
            Self::Futures => "futures",
        };
        f.write_str(label)
    }
}

/// Direction of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Long,
    Short,
}

impl TradeSide {
    /// Infer the side from where the protective stop sits relative to entry.
    ///
    /// Returns `None` when the two prices are equal.
    pub fn from_stop(entry_price: Decimal, stop_price: Decimal) -> Option<Self> {
        if stop_price < entry_price {
            Some(Self::Long)
        } else if stop_price > entry_price {
            Some(Self::Short)
        } else {
            None
        }
    }

    /// Whether `target` lies on the profitable side of `entry`
    pub fn is_profit_side(&self, entry_price: Decimal, target: Decimal) -> bool {
        match self {
            Self::Long => target > entry_price,
            Self::Short => target < entry_price,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => f.write_str("long"),
            Self::Short => f.write_str("short"),
        }
    }
}

/// Trader's capital base for a single calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccountContext {
    /// Account balance in account currency
    pub balance: Decimal,
    /// Percentage of the balance put at risk (1 = 1%)
    pub risk_percentage: Decimal,
}

impl AccountContext {
    /// Create an account context
    pub fn new(balance: Decimal, risk_percentage: Decimal) -> Self {
        Self {
            balance,
            risk_percentage,
        }
    }

    /// Build from floating point inputs, rejecting NaN and infinities
    pub fn from_f64(balance: f64, risk_percentage: f64) -> Result<Self, CalcError> {
        Ok(Self {
            balance: validation::decimal_from_f64("balance", balance)?,
            risk_percentage: validation::decimal_from_f64("risk_percentage", risk_percentage)?,
        })
    }

    /// Amount of money at risk: `balance × riskPercentage / 100`
    pub fn risk_amount(&self) -> Result<Decimal, CalcError> {
        let scaled = numeric::checked_mul(self.balance, self.risk_percentage, "risk amount")?;
        numeric::checked_div(scaled, dec!(100), "risk amount")
    }
}

impl Validate for AccountContext {
    fn check(&self) -> Result<(), CalcError> {
        validation::positive("balance", self.balance)?;
        validation::percentage("risk_percentage", self.risk_percentage)?;
        Ok(())
    }
}
