//! Forex command implementation

use super::{emit, AccountArgs, OutputFormat};
use crate::config::Config;
use crate::forex::{CurrencyPair, ForexCalculator, ForexTradeParams};
use crate::report::Report;
use crate::risk::RiskSummary;
use crate::telemetry::record_calculation;
use crate::types::Instrument;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct ForexArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Currency pair (EUR/USD, EURUSD)
    #[arg(long)]
    pub pair: CurrencyPair,

    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Stop-loss distance in pips
    #[arg(long)]
    pub stop_pips: Decimal,

    /// Take-profit distance in pips
    #[arg(long)]
    pub take_profit_pips: Option<Decimal>,

    /// Account leverage
    #[arg(long, default_value = "30")]
    pub leverage: Decimal,

    /// Account currency; defaults to the configured one
    #[arg(long)]
    pub account_currency: Option<String>,

    /// Quote-to-account conversion rate for cross pairs
    #[arg(long)]
    pub conversion_rate: Option<Decimal>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl ForexArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let account = self.account.resolve(config)?;
        let params = ForexTradeParams {
            pair: self.pair.clone(),
            entry_price: self.entry,
            stop_loss_pips: self.stop_pips,
            take_profit_pips: self.take_profit_pips,
            leverage: self.leverage,
            account_currency: self
                .account_currency
                .clone()
                .unwrap_or_else(|| config.account.currency.clone()),
            conversion_rate: self.conversion_rate,
        };

        let result = ForexCalculator::from_config(&config.forex).calculate(&account, &params);
        record_calculation(Instrument::Forex, &result);
        let result = result?;

        emit(self.format, &result, Report::from(&result), &result.summary())
    }
}
