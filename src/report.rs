//! Display-ready rendering of calculation results
//!
//! Values are rounded for presentation only (half-to-even); the results
//! themselves keep full precision.

use crate::crypto::CryptoResult;
use crate::forex::ForexResult;
use crate::futures::FuturesResult;
use crate::options::OptionsResult;
use crate::risk::{RiskAssessment, SharpeRatio};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

/// Round a money amount to cents
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Round a percentage to 2 decimal places
pub fn round_percentage(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

fn money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

fn percent(value: Decimal) -> String {
    format!("{:.2}%", round_percentage(value))
}

fn ratio(value: Option<Decimal>) -> String {
    value
        .map(|r| format!("1:{:.2}", r.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)))
        .unwrap_or_else(|| "-".to_string())
}

fn optional_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| "-".to_string())
}

/// A titled list of label/value rows
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub rows: Vec<(String, String)>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    /// Value of the first row with this label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        writeln!(f, "{}", self.title)?;
        for (label, value) in &self.rows {
            writeln!(f, "  {label:<width$}  {value}")?;
        }
        Ok(())
    }
}

impl From<&ForexResult> for Report {
    fn from(r: &ForexResult) -> Self {
        Report::new(format!("Forex {}", r.pair))
            .row("Risk amount", money(r.risk_amount))
            .row("Pip size", r.pip_size.normalize().to_string())
            .row("Pip value / lot", money(r.pip_value_per_lot))
            .row("Lot size", format!("{:.2}", r.lot_size))
            .row(
                "Lots (std/mini/micro)",
                format!(
                    "{}/{}/{}",
                    r.lot_breakdown.standard, r.lot_breakdown.mini, r.lot_breakdown.micro
                ),
            )
            .row("Units", r.units.normalize().to_string())
            .row("Notional", money(r.notional_value))
            .row("Margin", money(r.margin))
            .row("Potential loss", money(r.potential_loss))
            .row("Potential profit", optional_money(r.potential_profit))
            .row("Risk:reward", ratio(r.risk_reward_ratio))
            .row("Actual risk", percent(r.actual_risk_percentage))
    }
}

impl From<&CryptoResult> for Report {
    fn from(r: &CryptoResult) -> Self {
        Report::new(format!("Crypto {} ({})", r.side, r.margin_type))
            .row("Risk amount", money(r.risk_amount))
            .row("Quantity", format!("{:.8}", r.quantity))
            .row("Notional", money(r.notional_value))
            .row("Margin", money(r.margin))
            .row("Effective leverage", format!("{:.2}x", r.effective_leverage))
            .row("Liquidation price", optional_money(r.liquidation_price))
            .row(
                "Liquidation distance",
                r.liquidation_distance_percentage
                    .map(percent)
                    .unwrap_or_else(|| "-".to_string()),
            )
            .row("Potential loss", money(r.potential_loss))
            .row("Potential profit", optional_money(r.potential_profit))
            .row("Risk:reward", ratio(r.risk_reward_ratio))
            .row("Funding cost", optional_money(r.funding_cost))
    }
}

impl From<&OptionsResult> for Report {
    fn from(r: &OptionsResult) -> Self {
        let mut report = Report::new(format!("Long {} ({})", r.option_type, r.moneyness))
            .row("Contracts", format!("{} x {}", r.contracts, r.contract_size))
            .row("Total cost", money(r.total_cost))
            .row("Breakeven", money(r.breakeven))
            .row("Max loss", money(r.max_loss))
            .row(
                "Max profit",
                r.max_profit
                    .amount()
                    .map(money)
                    .unwrap_or_else(|| "unbounded".to_string()),
            )
            .row("Intrinsic value", money(r.intrinsic_value))
            .row("Time value", money(r.time_value));
        if let Some(theoretical) = &r.theoretical {
            report = report
                .row("Theoretical price", format!("{:.4}", theoretical.price))
                .row("Edge / share", format!("{:.4}", theoretical.edge))
                .row("Delta", format!("{:.4}", theoretical.greeks.delta))
                .row("Gamma", format!("{:.4}", theoretical.greeks.gamma))
                .row("Theta / day", format!("{:.4}", theoretical.greeks.theta))
                .row("Vega", format!("{:.4}", theoretical.greeks.vega))
                .row("Rho", format!("{:.4}", theoretical.greeks.rho))
                .row("Position delta", format!("{:.2}", theoretical.position_delta));
        }
        report
    }
}

impl From<&FuturesResult> for Report {
    fn from(r: &FuturesResult) -> Self {
        Report::new(format!("Futures {}", r.side))
            .row("Risk amount", money(r.risk_amount))
            .row("Contracts", format!("{} ({:.4} raw)", r.contracts, r.raw_contracts))
            .row("Notional", money(r.notional_value))
            .row("Margin", money(r.margin))
            .row("Tick value", money(r.tick_value))
            .row("Risk in ticks", r.risk_ticks.normalize().to_string())
            .row("Potential loss", money(r.potential_loss))
            .row("Potential profit", optional_money(r.potential_profit))
            .row("Risk:reward", ratio(r.risk_reward_ratio))
            .row("Actual risk", percent(r.actual_risk_percentage))
    }
}

impl From<&RiskAssessment> for Report {
    fn from(a: &RiskAssessment) -> Self {
        Report::new("Risk assessment")
            .row("Margin utilization", percent(a.margin_utilization))
            .row("Leverage warning", a.leverage_warning.to_string())
            .row("Effective leverage", format!("{:.2}x", a.effective_leverage))
            .row("Risk of balance", percent(a.risk_percentage))
            .row(
                "Risk:reward class",
                a.risk_reward_class
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            )
    }
}

impl From<SharpeRatio> for Report {
    fn from(s: SharpeRatio) -> Self {
        Report::new("Sharpe ratio").row("Sharpe", s.to_string())
    }
}
