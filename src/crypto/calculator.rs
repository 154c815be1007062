//! Notional sizing, margin, liquidation and funding for crypto perpetuals

use super::liquidation::{cross_liquidation_price, isolated_liquidation_price};
use super::types::{CryptoResult, CryptoTradeParams, MarginType};
use crate::config::CryptoConfig;
use crate::error::CalcError;
use crate::numeric::{checked_div, checked_mul, truncate_dp};
use crate::types::{AccountContext, TradeSide};
use crate::validation::{self, Validate, Validated};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal places kept on coin quantities
pub const QUANTITY_DP: u32 = 8;

/// Crypto perpetual position calculator
#[derive(Debug, Clone)]
pub struct CryptoCalculator {
    /// Maintenance margin rate applied when a request omits one
    pub default_maintenance_margin_rate: Decimal,
    /// Hours between funding payments
    pub funding_interval_hours: Decimal,
}

impl CryptoCalculator {
    /// Create a new crypto calculator
    pub fn new(default_maintenance_margin_rate: Decimal, funding_interval_hours: Decimal) -> Self {
        Self {
            default_maintenance_margin_rate,
            funding_interval_hours,
        }
    }

    /// Create from CryptoConfig
    pub fn from_config(config: &CryptoConfig) -> Self {
        Self::new(
            config.default_maintenance_margin_rate,
            config.funding_interval_hours,
        )
    }

    /// Size a leveraged crypto position from the account's risk amount
    pub fn calculate(
        &self,
        account: &AccountContext,
        params: &CryptoTradeParams,
    ) -> Result<CryptoResult, CalcError> {
        validation::positive("funding_interval_hours", self.funding_interval_hours)?;
        let account = account.validate()?;
        let mut params = params.clone();
        // The configured default goes through the same checks as a caller-supplied rate
        params.maintenance_margin_rate = Some(
            params
                .maintenance_margin_rate
                .unwrap_or(self.default_maintenance_margin_rate),
        );
        let params = params.validate()?;
        self.size(&account, &params)
    }

    fn size(
        &self,
        account: &Validated<AccountContext>,
        params: &Validated<CryptoTradeParams>,
    ) -> Result<CryptoResult, CalcError> {
        let side = params.side().ok_or(CalcError::DivisionByZero {
            what: "entry price equals stop-loss price",
        })?;
        let maintenance_margin_rate = params.maintenance_margin_rate.unwrap_or_default();

        let risk_amount = account.risk_amount()?;
        let price_distance = validation::stop_distance(params.entry_price, params.stop_loss_price)?;
        let raw_quantity = checked_div(risk_amount, price_distance, "quantity")?;
        let quantity = truncate_dp(raw_quantity, QUANTITY_DP);
        if quantity.is_zero() {
            return Err(CalcError::InsufficientAccountSize {
                computed: raw_quantity,
                minimum: Decimal::new(1, QUANTITY_DP),
            });
        }

        let notional_value = checked_mul(quantity, params.entry_price, "notional value")?;
        let available_notional = checked_mul(account.balance, params.leverage, "max notional")?;
        if notional_value > available_notional {
            return Err(CalcError::LeverageInsufficient {
                required_notional: notional_value,
                available_notional,
            });
        }

        let margin = checked_div(notional_value, params.leverage, "margin")?;
        let effective_leverage = checked_div(notional_value, account.balance, "effective leverage")?;

        let liquidation_price = match params.margin_type {
            MarginType::Isolated => Some(isolated_liquidation_price(
                side,
                params.entry_price,
                params.leverage,
                maintenance_margin_rate,
            )?),
            MarginType::Cross => {
                let maintenance_margin =
                    checked_mul(notional_value, maintenance_margin_rate, "maintenance margin")?;
                cross_liquidation_price(
                    side,
                    params.entry_price,
                    quantity,
                    account.balance,
                    maintenance_margin,
                )?
            }
        };
        let liquidation_distance_percentage = liquidation_price
            .map(|price| {
                let distance = checked_mul((params.entry_price - price).abs(), dec!(100), "liquidation distance")?;
                checked_div(distance, params.entry_price, "liquidation distance")
            })
            .transpose()?;

        let potential_loss = checked_mul(quantity, price_distance, "potential loss")?;
        let potential_profit = params
            .take_profit_price
            .map(|target| checked_mul(quantity, (target - params.entry_price).abs(), "potential profit"))
            .transpose()?;
        let risk_reward_ratio = potential_profit
            .map(|profit| checked_div(profit, potential_loss, "risk reward ratio"))
            .transpose()?;

        let funding_cost = params
            .funding
            .map(|funding| self.funding_cost(side, notional_value, funding.funding_rate, funding.hours_held))
            .transpose()?;

        tracing::debug!(
            %side,
            margin_type = %params.margin_type,
            %quantity,
            %notional_value,
            %margin,
            liquidation_price = ?liquidation_price,
            "crypto position sized"
        );

        Ok(CryptoResult {
            side,
            margin_type: params.margin_type,
            balance: account.balance,
            risk_amount,
            quantity,
            notional_value,
            margin,
            leverage: params.leverage,
            effective_leverage,
            maintenance_margin_rate,
            liquidation_price,
            liquidation_distance_percentage,
            potential_loss,
            potential_profit,
            risk_reward_ratio,
            funding_cost,
        })
    }

    /// Funding over the holding period: `notional × rate × hours / interval`.
    ///
    /// Positive rates are paid by longs and received by shorts.
    pub fn funding_cost(
        &self,
        side: TradeSide,
        notional_value: Decimal,
        funding_rate: Decimal,
        hours_held: Decimal,
    ) -> Result<Decimal, CalcError> {
        let intervals = checked_div(hours_held, self.funding_interval_hours, "funding intervals")?;
        let per_interval = checked_mul(notional_value, funding_rate, "funding cost")?;
        let cost = checked_mul(per_interval, intervals, "funding cost")?;
        Ok(match side {
            TradeSide::Long => cost,
            TradeSide::Short => -cost,
        })
    }
}

impl Default for CryptoCalculator {
    fn default() -> Self {
        Self::from_config(&CryptoConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::FundingParams;

    fn btc_long() -> CryptoTradeParams {
        CryptoTradeParams {
            entry_price: dec!(43500),
            stop_loss_price: dec!(42000),
            take_profit_price: None,
            leverage: dec!(10),
            margin_type: MarginType::Isolated,
            maintenance_margin_rate: None,
            funding: None,
        }
    }

    #[test]
    fn test_btc_long_isolated() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let result = calc.calculate(&account, &btc_long()).unwrap();

        assert_eq!(result.side, TradeSide::Long);
        assert_eq!(result.quantity, dec!(0.13333333));
        assert_eq!(result.potential_loss.round_dp(2), dec!(200.00));
        assert_eq!(result.liquidation_price, Some(dec!(39150)));
        assert_eq!(result.liquidation_distance_percentage, Some(dec!(10)));
        assert_eq!(result.margin * result.leverage, result.notional_value);
    }

    #[test]
    fn test_short_liquidation_above_entry() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let mut params = btc_long();
        params.stop_loss_price = dec!(45000);
        let result = calc.calculate(&account, &params).unwrap();

        assert_eq!(result.side, TradeSide::Short);
        assert_eq!(result.liquidation_price, Some(dec!(47850)));
    }

    #[test]
    fn test_cross_margin_flagged() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let mut params = btc_long();
        params.margin_type = MarginType::Cross;
        let isolated = calc.calculate(&account, &btc_long()).unwrap();
        let cross = calc.calculate(&account, &params).unwrap();

        assert_eq!(cross.margin_type, MarginType::Cross);
        assert_eq!(cross.margin, isolated.margin);
        // Whole balance backs the position, so liquidation sits further away
        let cross_liq = cross.liquidation_price.unwrap_or(Decimal::ZERO);
        assert!(cross_liq < dec!(39150));
    }

    #[test]
    fn test_leverage_insufficient() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(5));
        let params = CryptoTradeParams {
            entry_price: dec!(100),
            stop_loss_price: dec!(99.9),
            leverage: dec!(2),
            ..btc_long()
        };
        // 500 / 0.1 = 5000 coins = 500,000 notional > 20,000
        let err = calc.calculate(&account, &params).unwrap_err();
        assert!(matches!(err, CalcError::LeverageInsufficient { .. }));
    }

    #[test]
    fn test_leverage_above_cap() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let params = CryptoTradeParams {
            leverage: dec!(200),
            ..btc_long()
        };
        let err = calc.calculate(&account, &params).unwrap_err();
        assert_eq!(
            err.to_string(),
            "leverage 200x exceeds the 125x maximum for crypto futures"
        );
    }

    #[test]
    fn test_equal_entry_and_stop() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let params = CryptoTradeParams {
            stop_loss_price: dec!(43500),
            ..btc_long()
        };
        assert!(matches!(
            calc.calculate(&account, &params),
            Err(CalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_take_profit_on_wrong_side() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let params = CryptoTradeParams {
            take_profit_price: Some(dec!(41000)),
            ..btc_long()
        };
        let err = calc.calculate(&account, &params).unwrap_err();
        assert_eq!(err.field(), Some("take_profit_price"));
    }

    #[test]
    fn test_take_profit_ratio() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let params = CryptoTradeParams {
            take_profit_price: Some(dec!(46500)),
            ..btc_long()
        };
        let result = calc.calculate(&account, &params).unwrap();
        assert_eq!(result.risk_reward_ratio, Some(dec!(2)));
    }

    #[test]
    fn test_maintenance_margin_at_initial_rate_rejected() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let params = CryptoTradeParams {
            leverage: dec!(125),
            maintenance_margin_rate: Some(dec!(0.01)),
            ..btc_long()
        };
        let err = calc.calculate(&account, &params).unwrap_err();
        assert_eq!(err.field(), Some("maintenance_margin_rate"));
    }

    #[test]
    fn test_funding_cost() {
        let calc = CryptoCalculator::default();
        let account = AccountContext::new(dec!(10000), dec!(2));
        let params = CryptoTradeParams {
            funding: Some(FundingParams {
                funding_rate: dec!(0.0001),
                hours_held: dec!(24),
            }),
            ..btc_long()
        };
        let result = calc.calculate(&account, &params).unwrap();
        let expected = result.notional_value * dec!(0.0001) * dec!(3);
        assert_eq!(result.funding_cost, Some(expected));
    }

    #[test]
    fn test_funding_cost_short_receives() {
        let calc = CryptoCalculator::default();
        let cost = calc
            .funding_cost(TradeSide::Short, dec!(10000), dec!(0.0001), dec!(8))
            .unwrap();
        assert_eq!(cost, dec!(-1));
    }

    #[test]
    fn test_configured_default_maintenance_rate() {
        let calc = CryptoCalculator::new(dec!(0.004), dec!(8));
        let account = AccountContext::new(dec!(10000), dec!(2));
        let result = calc.calculate(&account, &btc_long()).unwrap();
        assert_eq!(result.maintenance_margin_rate, dec!(0.004));
        // 43500 × (1 − 0.1 + 0.004)
        assert_eq!(result.liquidation_price, Some(dec!(39324)));
    }
}
