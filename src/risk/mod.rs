//! Risk metrics
//!
//! Margin diagnostics over any sizing result, plus stand-alone sizing models:
//! Kelly, fixed-ratio and ATR-based volatility sizing, and the Sharpe ratio.

mod assessment;
mod fixed_ratio;
mod kelly;
mod sharpe;
mod types;
mod volatility;

pub use assessment::{
    assess_risk, classify_risk_reward, leverage_warning, CAUTION_UTILIZATION, HIGH_UTILIZATION,
};
pub use fixed_ratio::{FixedRatioSizer, FixedRatioState};
pub use kelly::{kelly_fraction, raw_kelly, KellyCalculator, KELLY_CAP};
pub use sharpe::sharpe_ratio;
pub use types::{
    CalculationResult, LeverageWarning, RiskAssessment, RiskRewardClass, RiskSummary, SharpeRatio,
};
pub use volatility::{average_true_range, volatility_position_size, OhlcBar, DEFAULT_ATR_PERIOD};
