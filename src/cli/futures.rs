//! Futures command implementation

use super::{emit, AccountArgs, OutputFormat};
use crate::config::Config;
use crate::futures::{FuturesCalculator, FuturesTradeParams};
use crate::report::Report;
use crate::risk::RiskSummary;
use crate::telemetry::record_calculation;
use crate::types::Instrument;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct FuturesArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// Contract price
    #[arg(long)]
    pub price: Decimal,

    /// Stop-loss price
    #[arg(long)]
    pub stop: Decimal,

    /// Take-profit price
    #[arg(long)]
    pub take_profit: Option<Decimal>,

    /// Currency value of one point (50 for ES)
    #[arg(long)]
    pub multiplier: Decimal,

    /// Leverage
    #[arg(long, default_value = "10")]
    pub leverage: Decimal,

    /// Tick size; defaults to the configured one
    #[arg(long)]
    pub tick_size: Option<Decimal>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl FuturesArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let account = self.account.resolve(config)?;
        let params = FuturesTradeParams {
            contract_price: self.price,
            stop_loss_price: self.stop,
            take_profit_price: self.take_profit,
            multiplier: self.multiplier,
            leverage: self.leverage,
            tick_size: self.tick_size,
        };

        let result = FuturesCalculator::from_config(&config.futures).calculate(&account, &params);
        record_calculation(Instrument::Futures, &result);
        let result = result?;

        emit(self.format, &result, Report::from(&result), &result.summary())
    }
}
