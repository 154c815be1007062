//! Property-based tests for sizing invariants.
//!
//! These tests use proptest to check that the invariants hold across randomly
//! generated accounts and trades.

use proptest::prelude::*;
use risk_engine::crypto::{isolated_liquidation_price, CryptoTradeParams, MarginType};
use risk_engine::forex::ForexTradeParams;
use risk_engine::futures::FuturesTradeParams;
use risk_engine::options::{OptionType, OptionsTradeParams};
use risk_engine::types::TradeSide;
use risk_engine::{
    calculate_crypto_position, calculate_forex_position, calculate_futures_position,
    calculate_options_position, kelly_fraction, AccountContext, CalcError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Balance between $1,000 and $10,000,000 in whole dollars
fn balance_strategy() -> impl Strategy<Value = Decimal> {
    (1_000i64..=10_000_000i64).prop_map(Decimal::from)
}

/// Risk between 0.01% and 5%
fn risk_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=500i64).prop_map(|bp| Decimal::new(bp, 2))
}

/// Price with cents between $1 and $100,000
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (100i64..=10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn leverage_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=125i64).prop_map(Decimal::from)
}

fn side_strategy() -> impl Strategy<Value = TradeSide> {
    prop_oneof![Just(TradeSide::Long), Just(TradeSide::Short)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Forex loss never exceeds the risk budget and falls short by under one lot step
    #[test]
    fn forex_loss_tracks_risk(
        balance in balance_strategy(),
        risk in risk_strategy(),
        stop_pips in 5i64..=500i64,
        entry in 10_000i64..=15_000i64,
    ) {
        let account = AccountContext::new(balance, risk);
        let params = ForexTradeParams {
            pair: "EUR/USD".parse().unwrap(),
            entry_price: Decimal::new(entry, 4),
            stop_loss_pips: Decimal::from(stop_pips),
            take_profit_pips: None,
            leverage: dec!(100),
            account_currency: "USD".to_string(),
            conversion_rate: None,
        };

        match calculate_forex_position(&account, &params) {
            Ok(result) => {
                let one_step = dec!(0.01) * Decimal::from(stop_pips) * result.pip_value_per_lot;
                prop_assert!(result.potential_loss <= result.risk_amount);
                prop_assert!(result.risk_amount - result.potential_loss < one_step);
            }
            Err(CalcError::InsufficientAccountSize { .. }) => {}
            Err(err) => prop_assert!(false, "unexpected error: {err}"),
        }
    }

    /// margin × leverage reproduces the notional for isolated positions
    #[test]
    fn crypto_margin_times_leverage_is_notional(
        balance in balance_strategy(),
        risk in risk_strategy(),
        entry in price_strategy(),
        stop_pct in 1i64..=50i64,
        leverage in leverage_strategy(),
    ) {
        let stop = entry - entry * Decimal::new(stop_pct, 2);
        let account = AccountContext::new(balance, risk);
        let params = CryptoTradeParams {
            entry_price: entry,
            stop_loss_price: stop,
            take_profit_price: None,
            leverage,
            margin_type: MarginType::Isolated,
            maintenance_margin_rate: None,
            funding: None,
        };

        match calculate_crypto_position(&account, &params) {
            Ok(result) => {
                let diff = (result.margin * result.leverage - result.notional_value).abs();
                prop_assert!(diff <= dec!(0.000001), "diff = {diff}");
                prop_assert!(result.potential_loss <= result.risk_amount);
            }
            Err(CalcError::InsufficientAccountSize { .. })
            | Err(CalcError::LeverageInsufficient { .. }) => {}
            Err(err) => prop_assert!(false, "unexpected error: {err}"),
        }
    }

    /// Longs liquidate below entry and shorts above, for any leverage
    #[test]
    fn liquidation_on_losing_side(
        side in side_strategy(),
        entry in price_strategy(),
        leverage in leverage_strategy(),
    ) {
        let price = isolated_liquidation_price(side, entry, leverage, Decimal::ZERO).unwrap();
        match side {
            TradeSide::Long => prop_assert!(price < entry),
            TradeSide::Short => prop_assert!(price > entry),
        }
    }

    /// Kelly stays within [0, 0.25] for any input, including NaN and infinities
    #[test]
    fn kelly_always_bounded(
        win_rate in proptest::num::f64::ANY,
        avg_win in proptest::num::f64::ANY,
        avg_loss in proptest::num::f64::ANY,
    ) {
        let f = kelly_fraction(win_rate, avg_win, avg_loss);
        prop_assert!((0.0..=0.25).contains(&f), "kelly = {f}");
    }

    /// Call breakeven is strike plus premium
    #[test]
    fn call_breakeven(
        strike in price_strategy(),
        premium_cents in 0i64..=1_000_000i64,
        contracts in 1u32..=100u32,
    ) {
        let premium = Decimal::new(premium_cents, 2);
        let params = OptionsTradeParams {
            option_type: OptionType::Call,
            strike_price: strike,
            premium,
            contracts,
            underlying_price: strike,
            contract_size: 100,
            pricing: None,
        };
        let result = calculate_options_position(&params).unwrap();
        prop_assert_eq!(result.breakeven, strike + premium);
        prop_assert_eq!(result.max_loss, result.total_cost);
    }

    /// Equal entry and stop is always a division by zero
    #[test]
    fn equal_entry_and_stop_rejected(price in price_strategy(), leverage in leverage_strategy()) {
        let account = AccountContext::new(dec!(10000), dec!(1));
        let crypto = CryptoTradeParams {
            entry_price: price,
            stop_loss_price: price,
            take_profit_price: None,
            leverage,
            margin_type: MarginType::Cross,
            maintenance_margin_rate: None,
            funding: None,
        };
        let is_division_by_zero = matches!(
            calculate_crypto_position(&account, &crypto),
            Err(CalcError::DivisionByZero { .. })
        );
        prop_assert!(is_division_by_zero);

        let futures = FuturesTradeParams {
            contract_price: price,
            stop_loss_price: price,
            take_profit_price: None,
            multiplier: dec!(50),
            leverage,
            tick_size: None,
        };
        let is_division_by_zero = matches!(
            calculate_futures_position(&account, &futures),
            Err(CalcError::DivisionByZero { .. })
        );
        prop_assert!(is_division_by_zero);
    }
}
