//! Futures request and result types

use super::MIN_LEVERAGE;
use crate::error::CalcError;
use crate::types::{Instrument, TradeSide};
use crate::validation::{self, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One futures sizing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesTradeParams {
    /// Price of one contract in index points
    pub contract_price: Decimal,
    pub stop_loss_price: Decimal,
    pub take_profit_price: Option<Decimal>,
    /// Currency value of one index point
    pub multiplier: Decimal,
    /// Leverage (at least 1, no upper cap)
    pub leverage: Decimal,
    /// Minimum price increment; the calculator default applies when absent
    #[serde(default)]
    pub tick_size: Option<Decimal>,
}

impl FuturesTradeParams {
    /// Direction implied by the stop placement
    pub fn side(&self) -> Option<TradeSide> {
        TradeSide::from_stop(self.contract_price, self.stop_loss_price)
    }
}

impl Validate for FuturesTradeParams {
    fn check(&self) -> Result<(), CalcError> {
        validation::positive("contract_price", self.contract_price)?;
        validation::positive("stop_loss_price", self.stop_loss_price)?;
        validation::positive("multiplier", self.multiplier)?;
        if let Some(tick_size) = self.tick_size {
            validation::positive("tick_size", tick_size)?;
        }
        if let Some(take_profit) = self.take_profit_price {
            validation::positive("take_profit_price", take_profit)?;
        }
        validation::leverage(Instrument::Futures, self.leverage, MIN_LEVERAGE, None)?;
        validation::within_magnitude("leverage", self.leverage)?;
        validation::stop_distance(self.contract_price, self.stop_loss_price)?;

        if let (Some(side), Some(take_profit)) = (self.side(), self.take_profit_price) {
            if !side.is_profit_side(self.contract_price, take_profit) {
                return Err(CalcError::invalid(
                    "take_profit_price",
                    format!(
                        "{take_profit} is on the losing side of a {side} entry at {}",
                        self.contract_price
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Output of a futures sizing calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuturesResult {
    pub side: TradeSide,
    pub balance: Decimal,
    pub risk_amount: Decimal,
    /// Contract count before rounding down
    pub raw_contracts: Decimal,
    /// Whole contracts to trade
    pub contracts: u64,
    pub notional_value: Decimal,
    pub margin: Decimal,
    pub leverage: Decimal,
    pub tick_size: Decimal,
    /// Currency value of one tick for one contract
    pub tick_value: Decimal,
    /// Stop distance measured in ticks
    pub risk_ticks: Decimal,
    /// Loss of one contract at the stop
    pub risk_per_contract: Decimal,
    /// Loss of the whole position at the stop
    pub potential_loss: Decimal,
    pub potential_profit: Option<Decimal>,
    pub risk_reward_ratio: Option<Decimal>,
    /// Potential loss as a percentage of the balance
    pub actual_risk_percentage: Decimal,
}
