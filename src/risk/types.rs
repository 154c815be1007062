//! Instrument-neutral result summary and risk diagnostics

use crate::crypto::CryptoResult;
use crate::error::CalcError;
use crate::forex::ForexResult;
use crate::futures::FuturesResult;
use crate::numeric::{checked_div, checked_mul};
use crate::options::OptionsResult;
use crate::types::{AccountContext, Instrument};
use crate::validation::Validate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common view of a sizing result, consumed by [`assess_risk`](super::assess_risk)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub instrument: Instrument,
    /// Balance the position was sized against
    pub balance: Decimal,
    /// Lots, coins, shares or contracts depending on the instrument
    pub position_size: Decimal,
    pub notional_value: Decimal,
    /// Capital committed to the position
    pub margin: Decimal,
    pub potential_loss: Decimal,
    pub potential_profit: Option<Decimal>,
    pub risk_reward_ratio: Option<Decimal>,
}

/// Implemented by every result that was sized against an account
pub trait RiskSummary {
    fn summary(&self) -> CalculationResult;
}

impl RiskSummary for ForexResult {
    fn summary(&self) -> CalculationResult {
        CalculationResult {
            instrument: Instrument::Forex,
            balance: self.balance,
            position_size: self.lot_size,
            notional_value: self.notional_value,
            margin: self.margin,
            potential_loss: self.potential_loss,
            potential_profit: self.potential_profit,
            risk_reward_ratio: self.risk_reward_ratio,
        }
    }
}

impl RiskSummary for CryptoResult {
    fn summary(&self) -> CalculationResult {
        CalculationResult {
            instrument: Instrument::Crypto,
            balance: self.balance,
            position_size: self.quantity,
            notional_value: self.notional_value,
            margin: self.margin,
            potential_loss: self.potential_loss,
            potential_profit: self.potential_profit,
            risk_reward_ratio: self.risk_reward_ratio,
        }
    }
}

impl RiskSummary for FuturesResult {
    fn summary(&self) -> CalculationResult {
        CalculationResult {
            instrument: Instrument::Futures,
            balance: self.balance,
            position_size: Decimal::from(self.contracts),
            notional_value: self.notional_value,
            margin: self.margin,
            potential_loss: self.potential_loss,
            potential_profit: self.potential_profit,
            risk_reward_ratio: self.risk_reward_ratio,
        }
    }
}

impl OptionsResult {
    /// Summarize against an account; options are sized without one, so the
    /// balance has to be supplied here.
    ///
    /// The premium paid counts as margin. An unbounded call leaves profit and
    /// risk:reward empty.
    pub fn summary_for(&self, account: &AccountContext) -> Result<CalculationResult, CalcError> {
        let account = account.validate()?;
        let position_size = Decimal::from(self.shares);
        let potential_profit = self.max_profit.amount();
        let risk_reward_ratio = match potential_profit {
            Some(profit) if !self.max_loss.is_zero() => {
                Some(checked_div(profit, self.max_loss, "risk reward ratio")?)
            }
            _ => None,
        };
        Ok(CalculationResult {
            instrument: Instrument::Options,
            balance: account.balance,
            position_size,
            notional_value: checked_mul(position_size, self.underlying_price, "notional value")?,
            margin: self.total_cost,
            potential_loss: self.max_loss,
            potential_profit,
            risk_reward_ratio,
        })
    }
}

/// Margin utilization band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeverageWarning {
    /// Utilization at or below 50%
    None,
    /// Utilization above 50%
    Caution,
    /// Utilization above 80%
    High,
}

impl fmt::Display for LeverageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Caution => f.write_str("caution"),
            Self::High => f.write_str("high"),
        }
    }
}

/// Risk:reward band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskRewardClass {
    /// Below 1:1
    Poor,
    /// From 1:1 to 2:1 inclusive
    Acceptable,
    /// Above 2:1
    Good,
}

impl fmt::Display for RiskRewardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poor => f.write_str("poor"),
            Self::Acceptable => f.write_str("acceptable"),
            Self::Good => f.write_str("good"),
        }
    }
}

/// Diagnostics derived from a [`CalculationResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Margin as a percentage of balance
    pub margin_utilization: Decimal,
    pub leverage_warning: LeverageWarning,
    /// Notional divided by balance
    pub effective_leverage: Decimal,
    /// Potential loss as a percentage of balance
    pub risk_percentage: Decimal,
    /// Absent when no take-profit was given
    pub risk_reward_class: Option<RiskRewardClass>,
}

/// Sharpe ratio of a return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SharpeRatio {
    Defined(f64),
    /// The series has zero standard deviation
    Undefined,
}

impl SharpeRatio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(value) => Some(*value),
            Self::Undefined => None,
        }
    }
}

impl fmt::Display for SharpeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(value) => write!(f, "{value:.4}"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}
