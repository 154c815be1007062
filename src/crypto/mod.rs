//! Crypto margin calculator
//!
//! Notional sizing, isolated/cross margin, liquidation price and funding cost
//! for perpetual futures

mod calculator;
mod liquidation;
mod types;

pub use calculator::{CryptoCalculator, QUANTITY_DP};
pub use liquidation::{cross_liquidation_price, isolated_liquidation_price};
pub use types::{CryptoResult, CryptoTradeParams, FundingParams, MarginType};

use crate::error::CalcError;
use crate::types::{AccountContext, Instrument};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lowest accepted crypto leverage
pub const MIN_LEVERAGE: Decimal = dec!(1);
/// Highest accepted crypto leverage
pub const MAX_LEVERAGE: Decimal = dec!(125);

/// Size a crypto perpetual position with the default calculator settings
pub fn calculate_crypto_position(
    account: &AccountContext,
    params: &CryptoTradeParams,
) -> Result<CryptoResult, CalcError> {
    let result = CryptoCalculator::default().calculate(account, params);
    crate::telemetry::record_calculation(Instrument::Crypto, &result);
    result
}
