//! Forex request and result types

use super::pair::{currency_code, CurrencyPair};
use super::{MAX_LEVERAGE, MIN_LEVERAGE};
use crate::error::CalcError;
use crate::types::Instrument;
use crate::validation::{self, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One forex sizing request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexTradeParams {
    /// Traded pair
    pub pair: CurrencyPair,
    /// Entry price in quote currency
    pub entry_price: Decimal,
    /// Stop-loss distance in pips
    pub stop_loss_pips: Decimal,
    /// Take-profit distance in pips
    pub take_profit_pips: Option<Decimal>,
    /// Account leverage (1-500)
    pub leverage: Decimal,
    /// Currency the account is denominated in
    pub account_currency: String,
    /// Quote-to-account conversion rate, when neither leg of the pair is the
    /// account currency
    pub conversion_rate: Option<Decimal>,
}

impl Validate for ForexTradeParams {
    fn check(&self) -> Result<(), CalcError> {
        validation::positive("entry_price", self.entry_price)?;
        validation::positive("stop_loss_pips", self.stop_loss_pips)?;
        if let Some(take_profit_pips) = self.take_profit_pips {
            validation::positive("take_profit_pips", take_profit_pips)?;
        }
        if let Some(rate) = self.conversion_rate {
            validation::positive("conversion_rate", rate)?;
        }
        currency_code("account_currency", &self.account_currency)?;
        validation::leverage(
            Instrument::Forex,
            self.leverage,
            MIN_LEVERAGE,
            Some(MAX_LEVERAGE),
        )?;
        Ok(())
    }
}

/// Split of a lot size into standard, mini and micro lots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotBreakdown {
    pub standard: u64,
    pub mini: u64,
    pub micro: u64,
}

/// Output of a forex sizing calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexResult {
    pub pair: CurrencyPair,
    pub account_currency: String,
    /// Balance the position was sized against
    pub balance: Decimal,
    /// Money the trader asked to risk
    pub risk_amount: Decimal,
    /// Price increment of one pip
    pub pip_size: Decimal,
    /// Quote-to-account rate applied to pip values and notional
    pub conversion_rate: Decimal,
    /// Value of one pip for one standard lot, in account currency
    pub pip_value_per_lot: Decimal,
    /// Value of one pip for the sized position, in account currency
    pub pip_value: Decimal,
    /// Position size in standard lots, rounded down to the lot step
    pub lot_size: Decimal,
    pub lot_breakdown: LotBreakdown,
    /// Position size in base-currency units
    pub units: Decimal,
    /// Position value in account currency
    pub notional_value: Decimal,
    /// Required margin in account currency
    pub margin: Decimal,
    pub leverage: Decimal,
    /// Loss if the stop is hit
    pub potential_loss: Decimal,
    /// Profit if the take-profit is hit
    pub potential_profit: Option<Decimal>,
    pub risk_reward_ratio: Option<Decimal>,
    /// Loss at the stop as a percentage of balance, after lot rounding
    pub actual_risk_percentage: Decimal,
}
