//! Forex calculator
//!
//! Pip value, lot sizing and margin for spot and margin forex pairs

mod calculator;
mod pair;
mod types;

pub use calculator::{lot_breakdown, ForexCalculator};
pub use pair::{CurrencyPair, JPY_PIP, STANDARD_PIP};
pub use types::{ForexResult, ForexTradeParams, LotBreakdown};

use crate::error::CalcError;
use crate::types::{AccountContext, Instrument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lowest accepted forex leverage
pub const MIN_LEVERAGE: Decimal = dec!(1);
/// Highest accepted forex leverage
pub const MAX_LEVERAGE: Decimal = dec!(500);

/// Size a forex position with the default calculator settings
pub fn calculate_forex_position(
    account: &AccountContext,
    params: &ForexTradeParams,
) -> Result<ForexResult, CalcError> {
    let result = ForexCalculator::default().calculate(account, params);
    crate::telemetry::record_calculation(Instrument::Forex, &result);
    result
}
