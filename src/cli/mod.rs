//! CLI interface for risk-engine
//!
//! Provides subcommands for:
//! - `forex`, `crypto`, `options`, `futures`: size a position
//! - `kelly`, `sharpe`, `fixed-ratio`, `atr-size`: stand-alone risk models
//! - `config`: Show the effective configuration

mod crypto;
mod forex;
mod futures;
mod options;
mod risk;

pub use crypto::CryptoArgs;
pub use forex::ForexArgs;
pub use futures::FuturesArgs;
pub use options::OptionsArgs;
pub use risk::{AtrSizeArgs, FixedRatioArgs, KellyArgs, SharpeArgs};

use crate::amount::parse_amount;
use crate::config::Config;
use crate::report::Report;
use crate::risk::{assess_risk, CalculationResult};
use crate::types::AccountContext;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "risk-engine")]
#[command(about = "Position sizing and risk calculator for forex, crypto, options and futures")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Size a spot/margin forex position
    Forex(ForexArgs),
    /// Size a crypto perpetual position
    Crypto(CryptoArgs),
    /// Evaluate a long call or put
    Options(OptionsArgs),
    /// Size a futures position in whole contracts
    Futures(FuturesArgs),
    /// Kelly criterion stake
    Kelly(KellyArgs),
    /// Sharpe ratio of a return series
    Sharpe(SharpeArgs),
    /// Fixed-ratio contract scaling
    FixedRatio(FixedRatioArgs),
    /// ATR-based position size
    AtrSize(AtrSizeArgs),
    /// Show configuration
    Config,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Account flags shared by the sizing commands; config values fill the gaps
#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    /// Account balance, shorthand accepted (25k, 1.5m)
    #[arg(long)]
    pub balance: Option<String>,

    /// Percent of balance to risk (1 = 1%)
    #[arg(long)]
    pub risk: Option<Decimal>,
}

impl AccountArgs {
    pub fn resolve(&self, config: &Config) -> anyhow::Result<AccountContext> {
        let balance = match &self.balance {
            Some(raw) => parse_amount(raw)?,
            None => config.account.balance,
        };
        let risk = self.risk.unwrap_or(config.account.risk_percentage);
        Ok(AccountContext::new(balance, risk))
    }
}

/// Print a result and its risk assessment
fn emit<T: Serialize>(
    format: OutputFormat,
    result: &T,
    report: Report,
    summary: &CalculationResult,
) -> anyhow::Result<()> {
    let assessment = assess_risk(summary)?;
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "result": result,
                "assessment": assessment,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            println!("{report}");
            print!("{}", Report::from(&assessment));
        }
    }
    Ok(())
}

/// Print a result that has no account context
fn emit_plain<T: Serialize>(format: OutputFormat, result: &T, report: Report) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Table => print!("{report}"),
    }
    Ok(())
}
