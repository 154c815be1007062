//! Futures calculator
//!
//! Contract sizing, tick value and margin for exchange-traded futures

mod calculator;
mod types;

pub use calculator::FuturesCalculator;
pub use types::{FuturesResult, FuturesTradeParams};

use crate::error::CalcError;
use crate::types::{AccountContext, Instrument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lowest accepted futures leverage; there is no upper cap
pub const MIN_LEVERAGE: Decimal = dec!(1);

/// Size a futures position with the default calculator settings
pub fn calculate_futures_position(
    account: &AccountContext,
    params: &FuturesTradeParams,
) -> Result<FuturesResult, CalcError> {
    let result = FuturesCalculator::default().calculate(account, params);
    crate::telemetry::record_calculation(Instrument::Futures, &result);
    result
}
