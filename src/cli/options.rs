//! Options command implementation

use super::{emit, AccountArgs, OutputFormat};
use crate::config::Config;
use crate::options::{OptionType, OptionsCalculator, OptionsTradeParams, PricingInputs};
use crate::report::Report;
use crate::telemetry::record_calculation;
use crate::types::Instrument;
use chrono::{DateTime, Utc};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// call or put
    #[arg(long = "type")]
    pub option_type: OptionType,

    /// Strike price
    #[arg(long)]
    pub strike: Decimal,

    /// Premium per share
    #[arg(long)]
    pub premium: Decimal,

    /// Number of contracts
    #[arg(long, default_value = "1")]
    pub contracts: u32,

    /// Current underlying price
    #[arg(long)]
    pub underlying: Decimal,

    /// Shares per contract; defaults to the configured one
    #[arg(long)]
    pub contract_size: Option<u32>,

    /// Implied volatility (0.25 = 25%); enables theoretical value
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Calendar days to expiry
    #[arg(long, conflicts_with = "expiry")]
    pub days: Option<f64>,

    /// Expiry timestamp (RFC 3339)
    #[arg(long)]
    pub expiry: Option<DateTime<Utc>>,

    /// Risk-free rate; defaults to the configured one
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl OptionsArgs {
    fn pricing(&self, config: &Config) -> anyhow::Result<Option<PricingInputs>> {
        let Some(volatility) = self.volatility else {
            return Ok(None);
        };
        let rate = self.rate.unwrap_or(config.options.risk_free_rate);
        let inputs = match (self.days, self.expiry) {
            (Some(days), _) => PricingInputs::from_days(rate, volatility, days),
            (None, Some(expiry)) => PricingInputs::from_expiry(rate, volatility, expiry, Utc::now()),
            (None, None) => anyhow::bail!("--volatility needs --days or --expiry"),
        };
        Ok(Some(inputs))
    }

    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let account = self.account.resolve(config)?;
        let params = OptionsTradeParams {
            option_type: self.option_type,
            strike_price: self.strike,
            premium: self.premium,
            contracts: self.contracts,
            underlying_price: self.underlying,
            contract_size: self.contract_size.unwrap_or(config.options.contract_size),
            pricing: self.pricing(config)?,
        };

        let result = OptionsCalculator::from_config(&config.options).calculate(&params);
        record_calculation(Instrument::Options, &result);
        let result = result?;

        let summary = result.summary_for(&account)?;
        emit(self.format, &result, Report::from(&result), &summary)
    }
}
