//! Loading configuration files from disk

use risk_engine::config::{Config, LogFormat};
use risk_engine::crypto::{CryptoCalculator, CryptoTradeParams, MarginType};
use risk_engine::forex::{ForexCalculator, ForexTradeParams};
use risk_engine::AccountContext;
use rust_decimal_macros::dec;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
        [account]
        balance = 50000
        currency = "EUR"

        [crypto]
        default_maintenance_margin_rate = 0.005

        [telemetry]
        log_format = "json"
        "#,
    );

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.account.balance, dec!(50000));
    assert_eq!(config.account.risk_percentage, dec!(1));
    assert_eq!(config.account.currency, "EUR");
    assert_eq!(config.crypto.default_maintenance_margin_rate, dec!(0.005));
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
}

#[test]
fn test_shipped_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.forex.lot_step, dec!(0.01));
    assert_eq!(config.options.contract_size, 100);
}

#[test]
fn test_invalid_file_is_an_error() {
    let file = write_config("[account]\nbalance = \"lots\"\n");
    assert!(Config::load(file.path()).is_err());
}

#[test]
fn test_calculators_follow_config() {
    let file = write_config(
        r#"
        [forex]
        lot_step = 0.1

        [crypto]
        default_maintenance_margin_rate = 0.01
        "#,
    );
    let config = Config::load(file.path()).unwrap();
    let account = AccountContext::new(dec!(10000), dec!(1));

    // 0.2 lots is still a whole number of 0.1 steps; 0.25 would round to 0.2
    let forex = ForexTradeParams {
        pair: "EUR/USD".parse().unwrap(),
        entry_price: dec!(1.1),
        stop_loss_pips: dec!(40),
        take_profit_pips: None,
        leverage: dec!(30),
        account_currency: "USD".to_string(),
        conversion_rate: None,
    };
    let result = ForexCalculator::from_config(&config.forex)
        .calculate(&account, &forex)
        .unwrap();
    assert_eq!(result.lot_size, dec!(0.2));

    let crypto = CryptoTradeParams {
        entry_price: dec!(100),
        stop_loss_price: dec!(95),
        take_profit_price: None,
        leverage: dec!(10),
        margin_type: MarginType::Isolated,
        maintenance_margin_rate: None,
        funding: None,
    };
    let result = CryptoCalculator::from_config(&config.crypto)
        .calculate(&account, &crypto)
        .unwrap();
    assert_eq!(result.maintenance_margin_rate, dec!(0.01));
    // 100 × (1 − 0.1 + 0.01)
    assert_eq!(result.liquidation_price, Some(dec!(91)));
}
