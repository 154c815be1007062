//! Risk model commands: kelly, sharpe, fixed-ratio, atr-size

use super::{emit_plain, AccountArgs, OutputFormat};
use crate::amount::parse_amount;
use crate::config::Config;
use crate::report::Report;
use crate::risk::{
    average_true_range, kelly_fraction, sharpe_ratio, volatility_position_size, FixedRatioSizer,
    FixedRatioState, KellyCalculator, OhlcBar, DEFAULT_ATR_PERIOD, KELLY_CAP,
};
use crate::validation::Validate;
use clap::Args;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct KellyArgs {
    /// Historical win rate (0.55 = 55%)
    #[arg(long)]
    pub win_rate: f64,

    /// Average winning trade
    #[arg(long)]
    pub avg_win: f64,

    /// Average losing trade, as a positive number
    #[arg(long)]
    pub avg_loss: f64,

    /// Multiplier on full Kelly (0.5 = half Kelly)
    #[arg(long, default_value = "1.0")]
    pub fraction: f64,

    /// Balance to size against; defaults to the configured one
    #[arg(long)]
    pub balance: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl KellyArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let balance = match &self.balance {
            Some(raw) => parse_amount(raw)?,
            None => config.account.balance,
        };
        let calculator = KellyCalculator::new(self.fraction, KELLY_CAP)?;
        let capped = kelly_fraction(self.win_rate, self.avg_win, self.avg_loss);
        let stake_fraction = calculator.stake_fraction(self.win_rate, self.avg_win, self.avg_loss);
        let stake = calculator.calculate(balance, self.win_rate, self.avg_win, self.avg_loss)?;

        let body = serde_json::json!({
            "kelly_fraction": capped,
            "stake_fraction": stake_fraction,
            "stake": stake,
        });
        let report = Report::new("Kelly criterion")
            .row("Kelly fraction (capped)", format!("{:.4}", capped))
            .row("Stake fraction", format!("{:.4}", stake_fraction))
            .row("Stake", format!("{:.2}", stake));
        emit_plain(self.format, &body, report)
    }
}

#[derive(Args, Debug)]
pub struct SharpeArgs {
    /// Comma-separated per-period returns (0.01 = 1%)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
    pub returns: Vec<f64>,

    /// Risk-free rate per period
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub risk_free: f64,

    /// Annualize with this many periods per year (252 for daily)
    #[arg(long)]
    pub periods_per_year: Option<f64>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl SharpeArgs {
    pub fn execute(&self, _config: &Config) -> anyhow::Result<()> {
        let mut ratio = sharpe_ratio(&self.returns, self.risk_free)?;
        if let Some(periods) = self.periods_per_year {
            ratio = ratio.annualized(periods)?;
        }
        emit_plain(self.format, &ratio, Report::from(ratio))
    }
}

#[derive(Args, Debug)]
pub struct FixedRatioArgs {
    /// Profit per contract required to add a contract
    #[arg(long)]
    pub delta: Decimal,

    /// Starting contract count
    #[arg(long, default_value = "1")]
    pub base_contracts: u64,

    /// Current contract count (defaults to the base)
    #[arg(long)]
    pub contracts: Option<u64>,

    /// Profit carried since the last change
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub profit_since_change: Decimal,

    /// Profit or loss of the trade just closed
    #[arg(long, allow_negative_numbers = true, conflicts_with = "cumulative_profit")]
    pub trade_pnl: Option<Decimal>,

    /// Total profit since trading at the base size
    #[arg(long, allow_negative_numbers = true)]
    pub cumulative_profit: Option<Decimal>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl FixedRatioArgs {
    pub fn execute(&self, _config: &Config) -> anyhow::Result<()> {
        let sizer = FixedRatioSizer::new(self.delta, self.base_contracts)?;

        let state = match self.cumulative_profit {
            Some(profit) => FixedRatioState {
                contracts: sizer.contracts_for_profit(profit)?,
                profit_since_change: Decimal::ZERO,
            },
            None => sizer.apply_trade(
                FixedRatioState {
                    contracts: self.contracts.unwrap_or(self.base_contracts),
                    profit_since_change: self.profit_since_change,
                },
                self.trade_pnl.unwrap_or(Decimal::ZERO),
            )?,
        };
        let next_threshold = sizer.next_threshold(state.contracts)?;

        let report = Report::new("Fixed ratio")
            .row("Contracts", state.contracts.to_string())
            .row("Carried profit", format!("{:.2}", state.profit_since_change))
            .row("Next step at (cumulative)", format!("{:.2}", next_threshold));
        emit_plain(self.format, &state, report)
    }
}

#[derive(Args, Debug)]
pub struct AtrSizeArgs {
    #[command(flatten)]
    pub account: AccountArgs,

    /// ATR value; computed from --bars when omitted
    #[arg(long, required_unless_present = "bars")]
    pub atr: Option<Decimal>,

    /// JSON file with an array of {open, high, low, close} bars
    #[arg(long, conflicts_with = "atr")]
    pub bars: Option<PathBuf>,

    /// ATR lookback period
    #[arg(long, default_value_t = DEFAULT_ATR_PERIOD)]
    pub period: usize,

    /// Stop distance in ATR multiples
    #[arg(long, default_value = "2")]
    pub multiplier: Decimal,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

impl AtrSizeArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let account = self.account.resolve(config)?.validate()?;
        let atr = match (&self.atr, &self.bars) {
            (Some(atr), _) => *atr,
            (None, Some(path)) => {
                let content = std::fs::read_to_string(path)?;
                let bars: Vec<OhlcBar> = serde_json::from_str(&content)?;
                average_true_range(&bars, self.period)?
            }
            (None, None) => anyhow::bail!("either --atr or --bars is required"),
        };
        let risk_amount = account.risk_amount()?;
        let size = volatility_position_size(risk_amount, atr, self.multiplier)?;

        let body = serde_json::json!({
            "atr": atr,
            "risk_amount": risk_amount,
            "position_size": size,
        });
        let report = Report::new("Volatility sizing")
            .row("ATR", atr.round_dp(6).normalize().to_string())
            .row("Risk amount", format!("{:.2}", risk_amount))
            .row("Position size", size.round_dp(8).normalize().to_string());
        emit_plain(self.format, &body, report)
    }
}
