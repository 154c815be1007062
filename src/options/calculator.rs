//! Premium economics, moneyness and theoretical value for long options

use super::black_scholes::BlackScholes;
use super::types::{
    MaxProfit, Moneyness, OptionType, OptionsResult, OptionsTradeParams, TheoreticalValue,
};
use crate::config::OptionsConfig;
use crate::error::CalcError;
use crate::numeric::{checked_mul, ensure_finite, to_f64};
use crate::validation::{self, Validate, Validated};
use rust_decimal::Decimal;

/// Options position calculator
#[derive(Debug, Clone)]
pub struct OptionsCalculator {
    /// Relative distance from the strike still classed as at-the-money
    pub atm_band: Decimal,
}

impl OptionsCalculator {
    /// Create a new options calculator
    pub fn new(atm_band: Decimal) -> Self {
        Self { atm_band }
    }

    /// Create from OptionsConfig
    pub fn from_config(config: &OptionsConfig) -> Self {
        Self::new(config.atm_band)
    }

    /// Evaluate a long options position
    pub fn calculate(&self, params: &OptionsTradeParams) -> Result<OptionsResult, CalcError> {
        validation::non_negative("atm_band", self.atm_band)?;
        let params = params.clone().validate()?;
        self.evaluate(&params)
    }

    fn evaluate(&self, params: &Validated<OptionsTradeParams>) -> Result<OptionsResult, CalcError> {
        let shares = u64::from(params.contracts) * u64::from(params.contract_size);
        let share_count = Decimal::from(shares);

        let total_cost = checked_mul(params.premium, share_count, "total cost")?;
        let breakeven = match params.option_type {
            OptionType::Call => params.strike_price + params.premium,
            OptionType::Put => params.strike_price - params.premium,
        };
        let max_profit = match params.option_type {
            OptionType::Call => MaxProfit::Unbounded,
            OptionType::Put => MaxProfit::Bounded(checked_mul(
                params.strike_price - params.premium,
                share_count,
                "max profit",
            )?),
        };

        let moneyness = self.moneyness(
            params.option_type,
            params.underlying_price,
            params.strike_price,
        )?;
        let intrinsic_value = intrinsic_value(
            params.option_type,
            params.underlying_price,
            params.strike_price,
        );
        let time_value = params.premium - intrinsic_value;

        let theoretical = params
            .pricing
            .map(|pricing| {
                let model = BlackScholes::new(
                    params.option_type,
                    to_f64(params.underlying_price, "underlying price")?,
                    to_f64(params.strike_price, "strike price")?,
                    &pricing,
                )?;
                let price = model.price()?;
                let greeks = model.greeks()?;
                let premium = to_f64(params.premium, "premium")?;
                Ok::<_, CalcError>(TheoreticalValue {
                    price,
                    edge: ensure_finite(price - premium, "theoretical edge")?,
                    greeks,
                    position_delta: ensure_finite(greeks.delta * shares as f64, "position delta")?,
                })
            })
            .transpose()?;

        tracing::debug!(
            option_type = %params.option_type,
            %moneyness,
            %total_cost,
            %breakeven,
            "options position evaluated"
        );

        Ok(OptionsResult {
            option_type: params.option_type,
            moneyness,
            contracts: params.contracts,
            contract_size: params.contract_size,
            underlying_price: params.underlying_price,
            shares,
            total_cost,
            breakeven,
            max_loss: total_cost,
            max_profit,
            intrinsic_value,
            time_value,
            theoretical,
        })
    }

    /// Classify the underlying against the strike; inside `strike × atm_band` is ATM
    pub fn moneyness(
        &self,
        option_type: OptionType,
        underlying_price: Decimal,
        strike_price: Decimal,
    ) -> Result<Moneyness, CalcError> {
        let band = checked_mul(strike_price, self.atm_band, "atm band")?;
        let diff = underlying_price - strike_price;
        if diff.abs() <= band {
            return Ok(Moneyness::Atm);
        }
        let in_the_money = match option_type {
            OptionType::Call => diff > Decimal::ZERO,
            OptionType::Put => diff < Decimal::ZERO,
        };
        Ok(if in_the_money {
            Moneyness::Itm
        } else {
            Moneyness::Otm
        })
    }
}

impl Default for OptionsCalculator {
    fn default() -> Self {
        Self::from_config(&OptionsConfig::default())
    }
}

/// Exercise value per share at the given underlying price
pub fn intrinsic_value(option_type: OptionType, underlying_price: Decimal, strike_price: Decimal) -> Decimal {
    let value = match option_type {
        OptionType::Call => underlying_price - strike_price,
        OptionType::Put => strike_price - underlying_price,
    };
    value.max(Decimal::ZERO)
}
