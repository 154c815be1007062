//! ATR and volatility-based position sizing

use crate::error::CalcError;
use crate::numeric::{checked_div, checked_mul};
use crate::validation;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default ATR lookback
pub const DEFAULT_ATR_PERIOD: usize = 14;

/// One price bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcBar {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl OhlcBar {
    fn check(&self) -> Result<(), CalcError> {
        validation::positive("open", self.open)?;
        validation::positive("close", self.close)?;
        validation::positive("low", self.low)?;
        validation::positive("high", self.high)?;
        if self.high < self.low {
            return Err(CalcError::invalid(
                "high",
                format!("{} is below the bar low {}", self.high, self.low),
            ));
        }
        Ok(())
    }

    /// `max(high − low, |high − prev_close|, |low − prev_close|)`
    pub fn true_range(&self, previous: &OhlcBar) -> Decimal {
        let hl = self.high - self.low;
        let hc = (self.high - previous.close).abs();
        let lc = (self.low - previous.close).abs();
        hl.max(hc).max(lc)
    }
}

/// Average true range with Wilder smoothing; needs `period + 1` bars
pub fn average_true_range(bars: &[OhlcBar], period: usize) -> Result<Decimal, CalcError> {
    if period == 0 {
        return Err(CalcError::invalid("period", "must be at least 1"));
    }
    if bars.len() < period + 1 {
        return Err(CalcError::invalid(
            "bars",
            format!("need at least {} bars for a {period}-period ATR, got {}", period + 1, bars.len()),
        ));
    }
    for bar in bars {
        bar.check()?;
    }

    let true_ranges: Vec<Decimal> = bars
        .windows(2)
        .map(|pair| pair[1].true_range(&pair[0]))
        .collect();

    let n = Decimal::from(period);
    let seed: Decimal = true_ranges.iter().take(period).sum();
    let mut atr = checked_div(seed, n, "atr")?;
    for tr in true_ranges.iter().skip(period) {
        let weighted = checked_mul(atr, n - Decimal::ONE, "atr")?;
        atr = checked_div(weighted + tr, n, "atr")?;
    }
    Ok(atr)
}

/// `risk_amount / (atr × multiplier)`
pub fn volatility_position_size(
    risk_amount: Decimal,
    atr: Decimal,
    multiplier: Decimal,
) -> Result<Decimal, CalcError> {
    validation::positive("risk_amount", risk_amount)?;
    validation::non_negative("atr", atr)?;
    validation::positive("multiplier", multiplier)?;
    if atr.is_zero() {
        return Err(CalcError::DivisionByZero { what: "average true range is zero" });
    }
    let stop_distance = checked_mul(atr, multiplier, "volatility stop")?;
    checked_div(risk_amount, stop_distance, "volatility position size")
}
