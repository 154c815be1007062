//! Crypto command implementation

use super::{emit, AccountArgs, OutputFormat};
use crate::config::Config;
use crate::crypto::{CryptoCalculator, CryptoTradeParams, FundingParams, MarginType};
use crate::report::Report;
use crate::risk::RiskSummary;
use crate::telemetry::record_calculation;
use crate::types::Instrument;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct CryptoArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Entry price
    #[arg(long)]
    pub entry: Decimal,

    /// Stop-loss price; below entry means long
    #[arg(long)]
    pub stop: Decimal,

    /// Take-profit price
    #[arg(long)]
    pub take_profit: Option<Decimal>,

    /// Leverage (1-125)
    #[arg(long, default_value = "10")]
    pub leverage: Decimal,

    /// isolated or cross
    #[arg(long, default_value = "isolated")]
    pub margin_type: MarginType,

    /// Maintenance margin rate (0.005 = 0.5%)
    #[arg(long)]
    pub mmr: Option<Decimal>,

    /// Funding rate per interval (0.0001 = 0.01%)
    #[arg(long, allow_negative_numbers = true, requires = "hours_held")]
    pub funding_rate: Option<Decimal>,

    /// Expected holding period in hours
    #[arg(long, requires = "funding_rate")]
    pub hours_held: Option<Decimal>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl CryptoArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let account = self.account.resolve(config)?;
        let funding = match (self.funding_rate, self.hours_held) {
            (Some(funding_rate), Some(hours_held)) => Some(FundingParams {
                funding_rate,
                hours_held,
            }),
            _ => None,
        };
        let params = CryptoTradeParams {
            entry_price: self.entry,
            stop_loss_price: self.stop,
            take_profit_price: self.take_profit,
            leverage: self.leverage,
            margin_type: self.margin_type,
            maintenance_margin_rate: self.mmr,
            funding,
        };

        let result = CryptoCalculator::from_config(&config.crypto).calculate(&account, &params);
        record_calculation(Instrument::Crypto, &result);
        let result = result?;

        emit(self.format, &result, Report::from(&result), &result.summary())
    }
}
