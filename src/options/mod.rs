//! Options calculator
//!
//! Premium economics for long calls and puts plus Black-Scholes theoretical value

mod black_scholes;
mod calculator;
mod types;

pub use black_scholes::{normal_cdf, normal_pdf, BlackScholes, Greeks};
pub use calculator::{intrinsic_value, OptionsCalculator};
pub use types::{
    MaxProfit, Moneyness, OptionType, OptionsResult, OptionsTradeParams, PricingInputs,
    TheoreticalValue,
};

use crate::error::CalcError;
use crate::types::Instrument;

/// Evaluate a long options position with the default calculator settings
pub fn calculate_options_position(params: &OptionsTradeParams) -> Result<OptionsResult, CalcError> {
    let result = OptionsCalculator::default().calculate(params);
    crate::telemetry::record_calculation(Instrument::Options, &result);
    result
}
