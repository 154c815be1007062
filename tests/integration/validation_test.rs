//! Boundary and rejection behaviour of the public calculators

use risk_engine::crypto::{CryptoTradeParams, MarginType};
use risk_engine::forex::ForexTradeParams;
use risk_engine::futures::FuturesTradeParams;
use risk_engine::options::{OptionType, OptionsTradeParams};
use risk_engine::types::Instrument;
use risk_engine::{
    calculate_crypto_position, calculate_forex_position, calculate_futures_position,
    calculate_options_position, AccountContext, CalcError,
};
use rust_decimal_macros::dec;

fn account() -> AccountContext {
    AccountContext::new(dec!(10000), dec!(1))
}

fn eurusd() -> ForexTradeParams {
    ForexTradeParams {
        pair: "EURUSD".parse().unwrap(),
        entry_price: dec!(1.1),
        stop_loss_pips: dec!(20),
        take_profit_pips: None,
        leverage: dec!(50),
        account_currency: "USD".to_string(),
        conversion_rate: None,
    }
}

fn btc() -> CryptoTradeParams {
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
fn test_crypto_leverage_message() {
    let params = CryptoTradeParams {
        leverage: dec!(200),
        ..btc()
    };
    let err = calculate_crypto_position(&account(), &params).unwrap_err();
    assert_eq!(
        err,
        CalcError::LeverageOutOfBounds {
            instrument: Instrument::Crypto,
            provided: dec!(200),
            min: dec!(1),
            max: Some(dec!(125)),
        }
    );
    assert_eq!(
        err.to_string(),
        "leverage 200x exceeds the 125x maximum for crypto futures"
    );
}

#[test]
fn test_forex_leverage_bounds() {
    for (leverage, ok) in [(dec!(1), true), (dec!(500), true), (dec!(0.9), false), (dec!(501), false)] {
        let params = ForexTradeParams {
            leverage,
            ..eurusd()
        };
        assert_eq!(
            calculate_forex_position(&account(), &params).is_ok(),
            ok,
            "leverage {leverage}"
        );
    }
}

#[test]
fn test_entry_equals_stop_is_division_by_zero() {
    let params = CryptoTradeParams {
        stop_loss_price: dec!(43500),
        ..btc()
    };
    assert!(matches!(
        calculate_crypto_position(&account(), &params),
        Err(CalcError::DivisionByZero { .. })
    ));

    let params = FuturesTradeParams {
        contract_price: dec!(100),
        stop_loss_price: dec!(100),
        take_profit_price: None,
        multiplier: dec!(5),
        leverage: dec!(2),
        tick_size: None,
    };
    assert!(matches!(
        calculate_futures_position(&account(), &params),
        Err(CalcError::DivisionByZero { .. })
    ));
}

#[test]
fn test_non_finite_account_rejected() {
    let err = AccountContext::from_f64(f64::NAN, 1.0).unwrap_err();
    assert_eq!(err.field(), Some("balance"));
}

#[test]
fn test_risk_percentage_bounds() {
    for risk in [dec!(0), dec!(-1), dec!(100.5)] {
        let account = AccountContext::new(dec!(10000), risk);
        let err = calculate_forex_position(&account, &eurusd()).unwrap_err();
        assert_eq!(err.field(), Some("risk_percentage"), "risk {risk}");
    }
}

#[test]
fn test_negative_balance_rejected() {
    let account = AccountContext::new(dec!(-10000), dec!(1));
    let err = calculate_crypto_position(&account, &btc()).unwrap_err();
    assert_eq!(err.field(), Some("balance"));
}

#[test]
fn test_oversized_inputs_rejected() {
    let account = AccountContext::new(dec!(10000000000000000), dec!(1));
    let err = calculate_crypto_position(&account, &btc()).unwrap_err();
    assert_eq!(err.field(), Some("balance"));
}

#[test]
fn test_forex_too_small_is_reported() {
    let account = AccountContext::new(dec!(50), dec!(1));
    let err = calculate_forex_position(&account, &eurusd()).unwrap_err();
    assert!(matches!(err, CalcError::InsufficientAccountSize { .. }));
}

#[test]
fn test_crypto_tight_stop_needs_more_leverage() {
    // $100 risk over a $10 stop buys 10 BTC, far beyond 10k × 2x
    let params = CryptoTradeParams {
        stop_loss_price: dec!(43490),
        leverage: dec!(2),
        ..btc()
    };
    assert!(matches!(
        calculate_crypto_position(&account(), &params),
        Err(CalcError::LeverageInsufficient { .. })
    ));
}

#[test]
fn test_options_put_premium_above_strike() {
    let params = OptionsTradeParams {
        option_type: OptionType::Put,
        strike_price: dec!(10),
        premium: dec!(12),
        contracts: 1,
        underlying_price: dec!(9),
        contract_size: 100,
        pricing: None,
    };
    let err = calculate_options_position(&params).unwrap_err();
    assert_eq!(err.field(), Some("premium"));
}

#[test]
fn test_futures_has_no_leverage_cap() {
    let params = FuturesTradeParams {
        contract_price: dec!(4500),
        stop_loss_price: dec!(4450),
        take_profit_price: None,
        multiplier: dec!(50),
        leverage: dec!(1000),
        tick_size: None,
    };
    let account = AccountContext::new(dec!(25000), dec!(10));
    assert!(calculate_futures_position(&account, &params).is_ok());
}
