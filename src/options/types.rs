//! Options request and result types

use super::black_scholes::Greeks;
use crate::error::CalcError;
use crate::validation::{self, Validate};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Call or put
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => f.write_str("call"),
            Self::Put => f.write_str("put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            other => Err(CalcError::invalid(
                "option_type",
                format!("expected 'call' or 'put', got '{other}'"),
            )),
        }
    }
}

/// Inputs for Black-Scholes theoretical value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    /// Continuously compounded annual risk-free rate (0.05 = 5%)
    pub risk_free_rate: f64,
    /// Annualized implied volatility (0.25 = 25%)
    pub volatility: f64,
    /// Time to expiry in years
    pub time_to_expiry_years: f64,
}

impl PricingInputs {
    /// Build pricing inputs from an expiry timestamp
    pub fn from_expiry(
        risk_free_rate: f64,
        volatility: f64,
        expiry: DateTime<Utc>,
        as_of: DateTime<Utc>,
    ) -> Self {
        let seconds = (expiry - as_of).num_milliseconds() as f64 / 1000.0;
        Self {
            risk_free_rate,
            volatility,
            time_to_expiry_years: seconds / SECONDS_PER_YEAR,
        }
    }

    /// Build pricing inputs from calendar days to expiry
    pub fn from_days(risk_free_rate: f64, volatility: f64, days: f64) -> Self {
        Self {
            risk_free_rate,
            volatility,
            time_to_expiry_years: days / 365.0,
        }
    }
}

impl Validate for PricingInputs {
    fn check(&self) -> Result<(), CalcError> {
        validation::finite("risk_free_rate", self.risk_free_rate)?;
        validation::positive_f64("volatility", self.volatility)?;
        let t = validation::finite("time_to_expiry_years", self.time_to_expiry_years)?;
        if t < 0.0 {
            return Err(CalcError::invalid(
                "time_to_expiry_years",
                format!("option has already expired ({t:.6} years)"),
            ));
        }
        Ok(())
    }
}

fn default_contract_size() -> u32 {
    100
}

/// One long options position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsTradeParams {
    pub option_type: OptionType,
    pub strike_price: Decimal,
    /// Premium paid per share
    pub premium: Decimal,
    /// Number of contracts bought
    pub contracts: u32,
    pub underlying_price: Decimal,
    /// Shares per contract
    #[serde(default = "default_contract_size")]
    pub contract_size: u32,
    /// Black-Scholes inputs; theoretical value is skipped when absent
    #[serde(default)]
    pub pricing: Option<PricingInputs>,
}

impl Validate for OptionsTradeParams {
    fn check(&self) -> Result<(), CalcError> {
        validation::positive("strike_price", self.strike_price)?;
        validation::non_negative("premium", self.premium)?;
        validation::positive("underlying_price", self.underlying_price)?;
        if self.contracts == 0 {
            return Err(CalcError::invalid("contracts", "must be at least 1"));
        }
        if self.contract_size == 0 {
            return Err(CalcError::invalid("contract_size", "must be at least 1"));
        }
        if self.option_type == OptionType::Put && self.premium > self.strike_price {
            return Err(CalcError::invalid(
                "premium",
                format!(
                    "put premium {} exceeds the strike {}, the position cannot profit",
                    self.premium, self.strike_price
                ),
            ));
        }
        if let Some(pricing) = &self.pricing {
            pricing.check()?;
        }
        Ok(())
    }
}

/// Where the underlying sits relative to the strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Moneyness {
    /// In the money
    Itm,
    /// At the money
    Atm,
    /// Out of the money
    Otm,
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Itm => f.write_str("ITM"),
            Self::Atm => f.write_str("ATM"),
            Self::Otm => f.write_str("OTM"),
        }
    }
}

/// Maximum profit of a long option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum MaxProfit {
    /// No upper bound (long call)
    Unbounded,
    /// Capped amount (long put, reached when the underlying goes to zero)
    Bounded(Decimal),
}

impl MaxProfit {
    /// The capped amount, if any
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Unbounded => None,
            Self::Bounded(amount) => Some(*amount),
        }
    }
}

impl fmt::Display for MaxProfit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unbounded => f.write_str("unbounded"),
            Self::Bounded(amount) => write!(f, "{amount}"),
        }
    }
}

/// Black-Scholes valuation of the position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalValue {
    /// Model price per share
    pub price: f64,
    /// Model price minus premium paid, per share
    pub edge: f64,
    pub greeks: Greeks,
    /// Delta × shares held
    pub position_delta: f64,
}

/// Output of an options calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsResult {
    pub option_type: OptionType,
    pub moneyness: Moneyness,
    pub contracts: u32,
    pub contract_size: u32,
    pub underlying_price: Decimal,
    /// Total shares controlled
    pub shares: u64,
    /// Premium × contracts × contract size
    pub total_cost: Decimal,
    pub breakeven: Decimal,
    pub max_loss: Decimal,
    pub max_profit: MaxProfit,
    /// Intrinsic value per share at the current underlying price
    pub intrinsic_value: Decimal,
    /// Premium minus intrinsic value, per share
    pub time_value: Decimal,
    pub theoretical: Option<TheoreticalValue>,
}
