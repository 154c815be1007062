//! Liquidation price estimates
//!
//! Isolated margin:
//! - long:  `entry × (1 − 1/leverage + mmr)`
//! - short: `entry × (1 + 1/leverage − mmr)`
//!
//! Cross margin treats the whole balance as collateral:
//! - long:  `entry − (balance − maintenance) / quantity`
//! - short: `entry + (balance − maintenance) / quantity`

use crate::error::CalcError;
use crate::numeric::{checked_div, checked_mul};
use crate::types::TradeSide;
use rust_decimal::Decimal;

/// Liquidation price of an isolated-margin position
pub fn isolated_liquidation_price(
    side: TradeSide,
    entry_price: Decimal,
    leverage: Decimal,
    maintenance_margin_rate: Decimal,
) -> Result<Decimal, CalcError> {
    let initial_margin_rate = checked_div(Decimal::ONE, leverage, "liquidation price")?;
    let factor = match side {
        TradeSide::Long => Decimal::ONE - initial_margin_rate + maintenance_margin_rate,
        TradeSide::Short => Decimal::ONE + initial_margin_rate - maintenance_margin_rate,
    };
    let price = checked_mul(entry_price, factor, "liquidation price")?;
    reachable(side, entry_price, price)?;
    Ok(price)
}

/// Liquidation price of a cross-margin position backed by the whole balance.
///
/// Returns `None` for a long whose estimate is at or below zero.
pub fn cross_liquidation_price(
    side: TradeSide,
    entry_price: Decimal,
    quantity: Decimal,
    balance: Decimal,
    maintenance_margin: Decimal,
) -> Result<Option<Decimal>, CalcError> {
    let buffer = checked_div(balance - maintenance_margin, quantity, "liquidation price")?;
    let price = match side {
        TradeSide::Long => entry_price - buffer,
        TradeSide::Short => entry_price + buffer,
    };
    if price <= Decimal::ZERO {
        return Ok(None);
    }
    reachable(side, entry_price, price)?;
    Ok(Some(price))
}

/// A liquidation price on the wrong side of entry means the inputs leave no margin buffer
fn reachable(side: TradeSide, entry_price: Decimal, price: Decimal) -> Result<(), CalcError> {
    let valid = match side {
        TradeSide::Long => price < entry_price,
        TradeSide::Short => price > entry_price,
    };
    if valid {
        Ok(())
    } else {
        Err(CalcError::invalid(
            "maintenance_margin_rate",
            format!("leaves no buffer: {side} liquidation at {price} vs entry {entry_price}"),
        ))
    }
}
