//! risk-engine: position sizing and risk calculator for multi-asset trading
//!
//! This library provides:
//! - Forex lot sizing, pip value and margin
//! - Crypto perpetual sizing, margin, liquidation price and funding cost
//! - Long option economics with Black-Scholes value and Greeks
//! - Futures whole-contract sizing, tick value and margin
//! - Risk diagnostics, Kelly, fixed-ratio, ATR sizing and Sharpe ratio
//! - Shorthand amount parsing and display-ready reports
//!
//! Every calculation is a pure, synchronous function of its inputs.

pub mod amount;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod forex;
pub mod futures;
pub mod numeric;
pub mod options;
pub mod report;
pub mod risk;
pub mod telemetry;
pub mod types;
pub mod validation;

pub use crypto::calculate_crypto_position;
pub use error::CalcError;
pub use forex::calculate_forex_position;
pub use futures::calculate_futures_position;
pub use options::calculate_options_position;
pub use risk::{assess_risk, kelly_fraction};
pub use types::{AccountContext, Instrument, TradeSide};
