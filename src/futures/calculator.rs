//! Whole-contract sizing, tick value and margin for futures

use super::types::{FuturesResult, FuturesTradeParams};
use crate::config::FuturesConfig;
use crate::error::CalcError;
use crate::numeric::{checked_div, checked_mul, internal_error};
use crate::types::AccountContext;
use crate::validation::{self, Validate, Validated};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Futures position calculator
#[derive(Debug, Clone)]
pub struct FuturesCalculator {
    /// Tick size applied when a request omits one
    pub default_tick_size: Decimal,
}

impl FuturesCalculator {
    /// Create a new futures calculator
    pub fn new(default_tick_size: Decimal) -> Self {
        Self { default_tick_size }
    }

    /// Create from FuturesConfig
    pub fn from_config(config: &FuturesConfig) -> Self {
        Self::new(config.default_tick_size)
    }

    /// Size a futures position in whole contracts from the account's risk amount
    pub fn calculate(
        &self,
        account: &AccountContext,
        params: &FuturesTradeParams,
    ) -> Result<FuturesResult, CalcError> {
        let account = account.validate()?;
        let mut params = params.clone();
        params.tick_size = Some(params.tick_size.unwrap_or(self.default_tick_size));
        let params = params.validate()?;
        self.size(&account, &params)
    }

    fn size(
        &self,
        account: &Validated<AccountContext>,
        params: &Validated<FuturesTradeParams>,
    ) -> Result<FuturesResult, CalcError> {
        let side = params.side().ok_or(CalcError::DivisionByZero {
            what: "entry price equals stop-loss price",
        })?;
        let tick_size = params.tick_size.unwrap_or(self.default_tick_size);

        let risk_amount = account.risk_amount()?;
        let price_distance =
            validation::stop_distance(params.contract_price, params.stop_loss_price)?;
        let risk_per_contract = checked_mul(price_distance, params.multiplier, "risk per contract")?;
        let raw_contracts = checked_div(risk_amount, risk_per_contract, "contracts")?;

        let whole = raw_contracts.floor();
        if whole.is_zero() {
            return Err(CalcError::PositionTooSmall { raw_contracts });
        }
        let contracts = whole.to_u64().ok_or_else(|| internal_error("contracts"))?;

        let contract_notional = checked_mul(params.contract_price, params.multiplier, "notional value")?;
        let notional_value = checked_mul(whole, contract_notional, "notional value")?;
        let margin = checked_div(notional_value, params.leverage, "margin")?;
        if margin > account.balance {
            return Err(CalcError::LeverageInsufficient {
                required_notional: notional_value,
                available_notional: checked_mul(account.balance, params.leverage, "max notional")?,
            });
        }

        let tick_value = checked_mul(params.multiplier, tick_size, "tick value")?;
        let risk_ticks = checked_div(price_distance, tick_size, "risk ticks")?;
        let potential_loss = checked_mul(whole, risk_per_contract, "potential loss")?;
        let potential_profit = params
            .take_profit_price
            .map(|target| {
                let per_contract = checked_mul(
                    (target - params.contract_price).abs(),
                    params.multiplier,
                    "potential profit",
                )?;
                checked_mul(whole, per_contract, "potential profit")
            })
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
            %side,
            %raw_contracts,
            contracts,
            %notional_value,
            %margin,
            "futures position sized"
        );

        Ok(FuturesResult {
            side,
            balance: account.balance,
            risk_amount,
            raw_contracts,
            contracts,
            notional_value,
            margin,
            leverage: params.leverage,
            tick_size,
            tick_value,
            risk_ticks,
            risk_per_contract,
            potential_loss,
            potential_profit,
            risk_reward_ratio,
            actual_risk_percentage,
        })
    }
}

impl Default for FuturesCalculator {
    fn default() -> Self {
        Self::from_config(&FuturesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TradeSide;

    fn es_long() -> FuturesTradeParams {
        FuturesTradeParams {
            contract_price: dec!(4500),
            stop_loss_price: dec!(4450),
            take_profit_price: None,
            multiplier: dec!(50),
            leverage: dec!(10),
            tick_size: None,
        }
    }

    #[test]
    fn test_single_contract() {
        let account = AccountContext::new(dec!(25000), dec!(10));
        let result = FuturesCalculator::default().calculate(&account, &es_long()).unwrap();

        assert_eq!(result.side, TradeSide::Long);
        assert_eq!(result.raw_contracts, dec!(1));
        assert_eq!(result.contracts, 1);
        assert_eq!(result.notional_value, dec!(225000));
        assert_eq!(result.margin, dec!(22500));
        assert_eq!(result.potential_loss, dec!(2500));
        assert_eq!(result.tick_size, dec!(0.25));
        assert_eq!(result.tick_value, dec!(12.5));
        assert_eq!(result.risk_ticks, dec!(200));
    }

    #[test]
    fn test_rounds_down_to_whole_contracts() {
        let account = AccountContext::new(dec!(100000), dec!(4));
        // 4000 / 2500 = 1.6 contracts
        let result = FuturesCalculator::default().calculate(&account, &es_long()).unwrap();
        assert_eq!(result.raw_contracts, dec!(1.6));
        assert_eq!(result.contracts, 1);
        assert!(result.potential_loss <= result.risk_amount);
    }

    #[test]
    fn test_position_too_small() {
        let account = AccountContext::new(dec!(25000), dec!(1));
        let err = FuturesCalculator::default()
            .calculate(&account, &es_long())
            .unwrap_err();
        assert_eq!(
            err,
            CalcError::PositionTooSmall {
                raw_contracts: dec!(0.1)
            }
        );
    }

    #[test]
    fn test_margin_exceeds_balance() {
        let account = AccountContext::new(dec!(25000), dec!(10));
        let params = FuturesTradeParams {
            leverage: dec!(5),
            ..es_long()
        };
        let err = FuturesCalculator::default()
            .calculate(&account, &params)
            .unwrap_err();
        assert!(matches!(err, CalcError::LeverageInsufficient { .. }));
    }

    #[test]
    fn test_short_with_take_profit() {
        let account = AccountContext::new(dec!(50000), dec!(2));
        let params = FuturesTradeParams {
            contract_price: dec!(4500),
            stop_loss_price: dec!(4510),
            take_profit_price: Some(dec!(4470)),
            tick_size: Some(dec!(0.25)),
            ..es_long()
        };
        // 1000 / (10 × 50) = 2 contracts
        let result = FuturesCalculator::default().calculate(&account, &params).unwrap();
        assert_eq!(result.side, TradeSide::Short);
        assert_eq!(result.contracts, 2);
        assert_eq!(result.potential_profit, Some(dec!(3000)));
        assert_eq!(result.risk_reward_ratio, Some(dec!(3)));
        assert_eq!(result.actual_risk_percentage, dec!(2));
    }

    #[test]
    fn test_take_profit_on_wrong_side() {
        let account = AccountContext::new(dec!(50000), dec!(2));
        let params = FuturesTradeParams {
            take_profit_price: Some(dec!(4400)),
            ..es_long()
        };
        let err = FuturesCalculator::default()
            .calculate(&account, &params)
            .unwrap_err();
        assert_eq!(err.field(), Some("take_profit_price"));
    }

    #[test]
    fn test_leverage_below_one() {
        let account = AccountContext::new(dec!(25000), dec!(10));
        let params = FuturesTradeParams {
            leverage: dec!(0.5),
            ..es_long()
        };
        let err = FuturesCalculator::default()
            .calculate(&account, &params)
            .unwrap_err();
        assert!(matches!(err, CalcError::LeverageOutOfBounds { .. }));
    }

    #[test]
    fn test_equal_entry_and_stop() {
        let account = AccountContext::new(dec!(25000), dec!(10));
        let params = FuturesTradeParams {
            stop_loss_price: dec!(4500),
            ..es_long()
        };
        let err = FuturesCalculator::default()
            .calculate(&account, &params)
            .unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));
    }
}
