//! Pip value, lot sizing and margin for spot forex

use super::types::{ForexResult, ForexTradeParams, LotBreakdown};
use crate::config::ForexConfig;
use crate::error::CalcError;
use crate::numeric::{checked_div, checked_mul, floor_to_step, truncate_dp};
use crate::types::AccountContext;
use crate::validation::{Validate, Validated};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Forex position calculator
#[derive(Debug, Clone)]
pub struct ForexCalculator {
    /// Base-currency units per standard lot
    pub contract_units: Decimal,
    /// Smallest tradable lot increment
    pub lot_step: Decimal,
}

impl ForexCalculator {
    /// Create a new forex calculator
    pub fn new(contract_units: Decimal, lot_step: Decimal) -> Self {
        Self {
            contract_units,
            lot_step,
        }
    }

    /// Create from ForexConfig
    pub fn from_config(config: &ForexConfig) -> Self {
        Self::new(config.contract_units, config.lot_step)
    }

    /// Size a forex position so that hitting the stop loses the account's risk amount
    pub fn calculate(
        &self,
        account: &AccountContext,
        params: &ForexTradeParams,
    ) -> Result<ForexResult, CalcError> {
        if self.contract_units <= Decimal::ZERO || self.lot_step <= Decimal::ZERO {
            return Err(CalcError::invalid(
                "forex config",
                "contract_units and lot_step must be positive",
            ));
        }
        let account = account.validate()?;
        let params = params.clone().validate()?;
        self.size(&account, &params)
    }

    fn size(
        &self,
        account: &Validated<AccountContext>,
        params: &Validated<ForexTradeParams>,
    ) -> Result<ForexResult, CalcError> {
        let pip_size = params.pair.pip_size();
        let conversion = self.conversion(params);

        let pip_value_quote = checked_mul(pip_size, self.contract_units, "pip value")?;
        let pip_value_per_lot = conversion.to_account(pip_value_quote)?;

        // Sizing runs in quote currency so the common USD-base case divides exactly
        let risk_amount = account.risk_amount()?;
        let risk_quote = conversion.to_quote(risk_amount)?;
        let risk_per_lot = checked_mul(params.stop_loss_pips, pip_value_quote, "risk per lot")?;
        let raw_lots = checked_div(risk_quote, risk_per_lot, "risk per lot")?;

        // Rounding down keeps the realised risk at or below the requested risk
        let lot_size = floor_to_step(raw_lots, self.lot_step, "lot size")?;
        if lot_size < self.lot_step {
            return Err(CalcError::InsufficientAccountSize {
                computed: truncate_dp(raw_lots, 4),
                minimum: self.lot_step,
            });
        }

        let pip_value = conversion.to_account(checked_mul(pip_value_quote, lot_size, "pip value")?)?;
        let units = checked_mul(lot_size, self.contract_units, "units")?;
        let notional_value =
            conversion.to_account(checked_mul(units, params.entry_price, "notional value")?)?;
        let margin = checked_div(notional_value, params.leverage, "margin")?;

        let potential_loss = checked_mul(params.stop_loss_pips, pip_value, "potential loss")?;
        let potential_profit = params
            .take_profit_pips
            .map(|pips| checked_mul(pips, pip_value, "potential profit"))
            .transpose()?;
        let risk_reward_ratio = potential_profit
            .map(|profit| checked_div(profit, potential_loss, "risk reward ratio"))
            .transpose()?;

        let actual_risk_percentage = checked_div(
            checked_mul(potential_loss, dec!(100), "actual risk")?,
            account.balance,
            "actual risk",
        )?;

        tracing::debug!(
            pair = %params.pair,
            %raw_lots,
            %lot_size,
            %pip_value_per_lot,
            %margin,
            "forex position sized"
        );

        Ok(ForexResult {
            pair: params.pair.clone(),
            account_currency: params.account_currency.trim().to_ascii_uppercase(),
            balance: account.balance,
            risk_amount,
            pip_size,
            conversion_rate: conversion.rate()?,
            pip_value_per_lot,
            pip_value,
            lot_size,
            lot_breakdown: lot_breakdown(lot_size),
            units,
            notional_value,
            margin,
            leverage: params.leverage,
            potential_loss,
            potential_profit,
            risk_reward_ratio,
            actual_risk_percentage,
        })
    }

    /// How quote-currency amounts convert into account currency.
    ///
    /// A caller-supplied rate wins. Otherwise the rate is 1 when the quote is the
    /// account currency and `1 / entry` when the base is; for crosses with no rate
    /// supplied, 1.0 is used and a warning is logged.
    fn conversion(&self, params: &ForexTradeParams) -> Conversion {
        if let Some(rate) = params.conversion_rate {
            return Conversion::Rate(rate);
        }
        let account_currency = params.account_currency.trim().to_ascii_uppercase();
        if params.pair.quote == account_currency {
            Conversion::Rate(Decimal::ONE)
        } else if params.pair.base == account_currency {
            Conversion::InversePrice(params.entry_price)
        } else {
            tracing::warn!(
                pair = %params.pair,
                account_currency = %account_currency,
                "no conversion rate supplied for cross pair, assuming 1.0"
            );
            Conversion::Rate(Decimal::ONE)
        }
    }
}

/// Quote-to-account conversion, kept as multiply-or-divide to avoid rounding `1 / price`
#[derive(Debug, Clone, Copy)]
enum Conversion {
    /// account = quote × rate
    Rate(Decimal),
    /// account = quote / price (account currency is the pair's base)
    InversePrice(Decimal),
}

impl Conversion {
    fn to_account(self, quote_amount: Decimal) -> Result<Decimal, CalcError> {
        match self {
            Self::Rate(rate) => checked_mul(quote_amount, rate, "currency conversion"),
            Self::InversePrice(price) => checked_div(quote_amount, price, "currency conversion"),
        }
    }

    fn to_quote(self, account_amount: Decimal) -> Result<Decimal, CalcError> {
        match self {
            Self::Rate(rate) => checked_div(account_amount, rate, "currency conversion"),
            Self::InversePrice(price) => checked_mul(account_amount, price, "currency conversion"),
        }
    }

    fn rate(self) -> Result<Decimal, CalcError> {
        self.to_account(Decimal::ONE)
    }
}

impl Default for ForexCalculator {
    fn default() -> Self {
        Self::from_config(&ForexConfig::default())
    }
}

/// Split a lot size into standard (1.0), mini (0.1) and micro (0.01) lots
pub fn lot_breakdown(lot_size: Decimal) -> LotBreakdown {
    let micro_total = (lot_size * dec!(100)).floor().to_u64().unwrap_or(0);
    LotBreakdown {
        standard: micro_total / 100,
        mini: (micro_total % 100) / 10,
        micro: micro_total % 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forex::CurrencyPair;

    fn params(pair: &str, entry: Decimal, stop_pips: Decimal) -> ForexTradeParams {
        ForexTradeParams {
            pair: pair.parse::<CurrencyPair>().unwrap(),
            entry_price: entry,
            stop_loss_pips: stop_pips,
            take_profit_pips: None,
            leverage: dec!(30),
            account_currency: "USD".to_string(),
            conversion_rate: None,
        }
    }

    #[test]
    fn test_eurusd_sizing() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(1));
        let result = calc
            .calculate(&account, &params("EUR/USD", dec!(1.0850), dec!(50)))
            .unwrap();

        assert_eq!(result.pip_value_per_lot, dec!(10));
        assert_eq!(result.lot_size, dec!(0.2));
        assert_eq!(result.units, dec!(20000));
        assert_eq!(result.potential_loss, dec!(100));
        // 20,000 EUR at 1.085 / 30
        assert_eq!(result.margin.round_dp(2), dec!(723.33));
        assert_eq!(result.actual_risk_percentage, dec!(1));
    }

    #[test]
    fn test_lot_size_rounds_down() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(1));
        // 100 / (33 * 10) = 0.3030.. lots
        let result = calc
            .calculate(&account, &params("EUR/USD", dec!(1.1), dec!(33)))
            .unwrap();

        assert_eq!(result.lot_size, dec!(0.30));
        assert!(result.potential_loss <= dec!(100));
        assert_eq!(result.potential_loss, dec!(99));
    }

    #[test]
    fn test_jpy_pair_uses_two_decimal_pip() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(1));
        let result = calc
            .calculate(&account, &params("USD/JPY", dec!(150), dec!(20)))
            .unwrap();

        assert_eq!(result.pip_size, dec!(0.01));
        // 1000 JPY per pip per lot, converted at 1/150
        assert_eq!(result.pip_value_per_lot.round_dp(4), dec!(6.6667));
        // 100 / (20 * 6.6667) = 0.75 lots
        assert_eq!(result.lot_size, dec!(0.75));
        // Notional in USD equals units for a USD-base pair
        assert_eq!(result.notional_value.round_dp(6), dec!(75000));
    }

    #[test]
    fn test_cross_pair_with_supplied_rate() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(1));
        let mut request = params("EUR/GBP", dec!(0.85), dec!(25));
        request.conversion_rate = Some(dec!(1.25));
        let result = calc.calculate(&account, &request).unwrap();

        assert_eq!(result.pip_value_per_lot, dec!(12.5));
        // 100 / (25 * 12.5) = 0.32
        assert_eq!(result.lot_size, dec!(0.32));
    }

    #[test]
    fn test_take_profit_and_ratio() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(1));
        let mut request = params("EUR/USD", dec!(1.0850), dec!(50));
        request.take_profit_pips = Some(dec!(100));
        let result = calc.calculate(&account, &request).unwrap();

        assert_eq!(result.potential_profit, Some(dec!(200)));
        assert_eq!(result.risk_reward_ratio, Some(dec!(2)));
    }

    #[test]
    fn test_insufficient_account_size() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(100), dec!(1));
        let err = calc
            .calculate(&account, &params("EUR/USD", dec!(1.0850), dec!(50)))
            .unwrap_err();

        // 1 / 500 = 0.002 lots
        assert_eq!(
            err,
            CalcError::InsufficientAccountSize {
                computed: dec!(0.002),
                minimum: dec!(0.01),
            }
        );
    }

    #[test]
    fn test_leverage_bounds() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(1));
        let mut request = params("EUR/USD", dec!(1.0850), dec!(50));
        request.leverage = dec!(501);
        assert!(matches!(
            calc.calculate(&account, &request),
            Err(CalcError::LeverageOutOfBounds { .. })
        ));

        request.leverage = dec!(500);
        assert!(calc.calculate(&account, &request).is_ok());
    }

    #[test]
    fn test_zero_stop_rejected() {
        let calc = ForexCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(1));
        let err = calc
            .calculate(&account, &params("EUR/USD", dec!(1.0850), dec!(0)))
            .unwrap_err();
        assert_eq!(err.field(), Some("stop_loss_pips"));
    }

    #[test]
    fn test_lot_breakdown() {
        assert_eq!(
            lot_breakdown(dec!(1.47)),
            LotBreakdown {
                standard: 1,
                mini: 4,
                micro: 7
            }
        );
        assert_eq!(
            lot_breakdown(dec!(0.2)),
            LotBreakdown {
                standard: 0,
                mini: 2,
                micro: 0
            }
        );
    }
}
