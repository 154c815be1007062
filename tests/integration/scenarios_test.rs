//! End-to-end sizing scenarios through the public API

use risk_engine::crypto::{CryptoTradeParams, MarginType};
use risk_engine::forex::ForexTradeParams;
use risk_engine::futures::FuturesTradeParams;
use risk_engine::options::{MaxProfit, Moneyness, OptionType, OptionsTradeParams};
use risk_engine::risk::{assess_risk, LeverageWarning, RiskRewardClass, RiskSummary};
use risk_engine::types::TradeSide;
use risk_engine::{
    calculate_crypto_position, calculate_forex_position, calculate_futures_position,
    calculate_options_position, AccountContext, CalcError,
};
use rust_decimal_macros::dec;

#[test]
fn test_forex_eurusd_one_percent() {
    let account = AccountContext::new(dec!(10000), dec!(1));
    let params = ForexTradeParams {
        pair: "EUR/USD".parse().unwrap(),
        entry_price: dec!(1.0850),
        stop_loss_pips: dec!(50),
        take_profit_pips: None,
        leverage: dec!(30),
        account_currency: "USD".to_string(),
        conversion_rate: None,
    };

    let result = calculate_forex_position(&account, &params).unwrap();

    // $100 / (50 pips × $10 per pip per lot)
    assert_eq!(result.lot_size, dec!(0.2));
    assert_eq!(result.potential_loss, dec!(100));
    assert_eq!(result.pip_value_per_lot, dec!(10));
    assert_eq!(result.units, dec!(20000));
    assert_eq!(result.margin, dec!(21700) / dec!(30));

    let assessment = assess_risk(&result.summary()).unwrap();
    assert_eq!(assessment.risk_percentage, dec!(1));
    assert_eq!(assessment.leverage_warning, LeverageWarning::None);
}

#[test]
fn test_crypto_btc_isolated_long() {
    let account = AccountContext::new(dec!(10000), dec!(2));
    let params = CryptoTradeParams {
        entry_price: dec!(43500),
        stop_loss_price: dec!(42000),
        take_profit_price: Some(dec!(47000)),
        leverage: dec!(10),
        margin_type: MarginType::Isolated,
        maintenance_margin_rate: None,
        funding: None,
    };

    let result = calculate_crypto_position(&account, &params).unwrap();

    assert_eq!(result.side, TradeSide::Long);
    assert_eq!(result.quantity, dec!(0.13333333));
    assert_eq!(result.liquidation_price, Some(dec!(39150)));
    // Truncating the quantity keeps the loss at or just under $200
    assert!(result.potential_loss <= dec!(200));
    assert!(dec!(200) - result.potential_loss < dec!(0.0001));
    assert_eq!(result.margin * result.leverage, result.notional_value);

    let assessment = assess_risk(&result.summary()).unwrap();
    assert_eq!(assessment.risk_reward_class, Some(RiskRewardClass::Good));
}

#[test]
fn test_options_spy_call() {
    let params = OptionsTradeParams {
        option_type: OptionType::Call,
        strike_price: dec!(460),
        premium: dec!(5.50),
        contracts: 5,
        underlying_price: dec!(450),
        contract_size: 100,
        pricing: None,
    };

    let result = calculate_options_position(&params).unwrap();

    assert_eq!(result.total_cost, dec!(2750));
    assert_eq!(result.breakeven, dec!(465.50));
    assert_eq!(result.max_loss, dec!(2750));
    assert_eq!(result.max_profit, MaxProfit::Unbounded);
    assert_eq!(result.moneyness, Moneyness::Otm);

    let account = AccountContext::new(dec!(25000), dec!(1));
    let summary = result.summary_for(&account).unwrap();
    assert_eq!(summary.margin, dec!(2750));
    assert_eq!(summary.potential_profit, None);
    let assessment = assess_risk(&summary).unwrap();
    assert_eq!(assessment.margin_utilization, dec!(11));
}

#[test]
fn test_futures_es_one_percent_is_too_small() {
    // $250 of risk against $2,500 per contract is a tenth of a contract
    let account = AccountContext::new(dec!(25000), dec!(1));
    let params = FuturesTradeParams {
        contract_price: dec!(4500),
        stop_loss_price: dec!(4450),
        take_profit_price: None,
        multiplier: dec!(50),
        leverage: dec!(10),
        tick_size: None,
    };

    let err = calculate_futures_position(&account, &params).unwrap_err();
    assert_eq!(
        err,
        CalcError::PositionTooSmall {
            raw_contracts: dec!(0.1)
        }
    );
}

#[test]
fn test_futures_es_single_contract() {
    let account = AccountContext::new(dec!(25000), dec!(10));
    let params = FuturesTradeParams {
        contract_price: dec!(4500),
        stop_loss_price: dec!(4450),
        take_profit_price: Some(dec!(4600)),
        multiplier: dec!(50),
        leverage: dec!(10),
        tick_size: None,
    };

    let result = calculate_futures_position(&account, &params).unwrap();

    assert_eq!(result.contracts, 1);
    assert_eq!(result.margin, dec!(22500));
    assert_eq!(result.risk_reward_ratio, Some(dec!(2)));

    let assessment = assess_risk(&result.summary()).unwrap();
    assert_eq!(assessment.margin_utilization, dec!(90));
    assert_eq!(assessment.leverage_warning, LeverageWarning::High);
    assert_eq!(assessment.risk_reward_class, Some(RiskRewardClass::Acceptable));
}

#[test]
fn test_results_serialize_for_persistence() {
    let params = OptionsTradeParams {
        option_type: OptionType::Call,
        strike_price: dec!(460),
        premium: dec!(5.50),
        contracts: 5,
        underlying_price: dec!(450),
        contract_size: 100,
        pricing: None,
    };
    let result = calculate_options_position(&params).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["moneyness"], "OTM");
    assert_eq!(json["max_profit"]["kind"], "unbounded");
    assert_eq!(json["option_type"], "call");
}
