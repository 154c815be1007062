//! Crypto perpetual request and result types

use super::{MAX_LEVERAGE, MIN_LEVERAGE};
use crate::error::CalcError;
use crate::numeric::checked_div;
use crate::types::{Instrument, TradeSide};
use crate::validation::{self, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How margin is attributed to the position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarginType {
    /// Margin ring-fenced to this position
    #[default]
    Isolated,
    /// Margin drawn from the shared account pool
    Cross,
}

impl fmt::Display for MarginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Isolated => f.write_str("isolated"),
            Self::Cross => f.write_str("cross"),
        }
    }
}

impl FromStr for MarginType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolated" => Ok(Self::Isolated),
            "cross" => Ok(Self::Cross),
            other => Err(CalcError::invalid(
                "margin_type",
                format!("expected 'isolated' or 'cross', got '{other}'"),
            )),
        }
    }
}

/// Perpetual funding assumptions for a holding period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundingParams {
    /// Rate charged per funding interval (0.0001 = 0.01%); negative means longs are paid
    pub funding_rate: Decimal,
    /// Expected holding period in hours
    pub hours_held: Decimal,
}

/// One crypto-margin sizing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoTradeParams {
    pub entry_price: Decimal,
    pub stop_loss_price: Decimal,
    pub take_profit_price: Option<Decimal>,
    /// Leverage (1-125)
    pub leverage: Decimal,
    pub margin_type: MarginType,
    /// Maintenance margin rate (0.005 = 0.5%)
    pub maintenance_margin_rate: Option<Decimal>,
    pub funding: Option<FundingParams>,
}

impl CryptoTradeParams {
    /// Direction implied by the stop placement
    pub fn side(&self) -> Option<TradeSide> {
        TradeSide::from_stop(self.entry_price, self.stop_loss_price)
    }
}

impl Validate for CryptoTradeParams {
    fn check(&self) -> Result<(), CalcError> {
        validation::positive("entry_price", self.entry_price)?;
        validation::positive("stop_loss_price", self.stop_loss_price)?;
        if let Some(take_profit) = self.take_profit_price {
            validation::positive("take_profit_price", take_profit)?;
        }
        validation::leverage(
            Instrument::Crypto,
            self.leverage,
            MIN_LEVERAGE,
            Some(MAX_LEVERAGE),
        )?;
        validation::stop_distance(self.entry_price, self.stop_loss_price)?;

        let side = self.side().ok_or(CalcError::DivisionByZero {
            what: "entry price equals stop-loss price",
        })?;
        if let Some(take_profit) = self.take_profit_price {
            if !side.is_profit_side(self.entry_price, take_profit) {
                return Err(CalcError::invalid(
                    "take_profit_price",
                    format!("{take_profit} is on the losing side of a {side} entry at {}", self.entry_price),
                ));
            }
        }

        if let Some(mmr) = self.maintenance_margin_rate {
            validation::rate("maintenance_margin_rate", mmr)?;
            let initial_margin_rate = checked_div(Decimal::ONE, self.leverage, "initial margin rate")?;
            if mmr >= initial_margin_rate {
                return Err(CalcError::invalid(
                    "maintenance_margin_rate",
                    format!(
                        "{mmr} is not below the initial margin rate {} at {}x, the position would be liquidated on entry",
                        initial_margin_rate.round_dp(6),
                        self.leverage.normalize()
                    ),
                ));
            }
        }

        if let Some(funding) = self.funding {
            if funding.funding_rate.abs() >= Decimal::ONE {
                return Err(CalcError::invalid(
                    "funding_rate",
                    format!("must be within (-1, 1), got {}", funding.funding_rate),
                ));
            }
            validation::non_negative("hours_held", funding.hours_held)?;
        }
        Ok(())
    }
}

/// Output of a crypto sizing calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoResult {
    pub side: TradeSide,
    pub margin_type: MarginType,
    pub balance: Decimal,
    pub risk_amount: Decimal,
    /// Coins to buy or sell, truncated to 8 decimals
    pub quantity: Decimal,
    pub notional_value: Decimal,
    /// Margin posted; for cross margin this comes out of the shared pool
    pub margin: Decimal,
    pub leverage: Decimal,
    /// Notional divided by balance
    pub effective_leverage: Decimal,
    pub maintenance_margin_rate: Decimal,
    /// Liquidation estimate; `None` when the position cannot be liquidated
    pub liquidation_price: Option<Decimal>,
    /// Distance from entry to liquidation in percent of entry
    pub liquidation_distance_percentage: Option<Decimal>,
    pub potential_loss: Decimal,
    pub potential_profit: Option<Decimal>,
    pub risk_reward_ratio: Option<Decimal>,
    /// Funding paid (positive) or received (negative) over the holding period
    pub funding_cost: Option<Decimal>,
}
