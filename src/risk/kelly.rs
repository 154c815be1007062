//! Kelly criterion sizing from historical win rate and payoff

use crate::error::CalcError;
use crate::numeric::{checked_mul, to_decimal};
use crate::validation;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Upper bound on any recommended fraction (quarter Kelly)
pub const KELLY_CAP: f64 = 0.25;

/// Full Kelly fraction `f* = p − (1 − p) / (avg_win / avg_loss)`.
///
/// Returns `None` when the inputs do not describe a usable edge estimate:
/// non-finite values, a win rate outside `[0, 1]`, or a non-positive average.
pub fn raw_kelly(win_rate: f64, avg_win: f64, avg_loss: f64) -> Option<f64> {
    if !(win_rate.is_finite() && avg_win.is_finite() && avg_loss.is_finite()) {
        return None;
    }
    if !(0.0..=1.0).contains(&win_rate) || avg_win <= 0.0 || avg_loss <= 0.0 {
        return None;
    }
    let payoff = avg_win / avg_loss;
    let kelly = win_rate - (1.0 - win_rate) / payoff;
    kelly.is_finite().then_some(kelly)
}

/// Kelly fraction clamped to `[0, 0.25]`; degenerate inputs give 0
pub fn kelly_fraction(win_rate: f64, avg_win: f64, avg_loss: f64) -> f64 {
    raw_kelly(win_rate, avg_win, avg_loss)
        .map(|kelly| kelly.clamp(0.0, KELLY_CAP))
        .unwrap_or(0.0)
}

/// Fractional Kelly calculator
#[derive(Debug, Clone)]
pub struct KellyCalculator {
    /// Multiplier on full Kelly (e.g., 0.5 for half Kelly)
    pub fraction: f64,
    /// Maximum fraction of the balance per trade
    pub max_fraction: f64,
}

impl KellyCalculator {
    /// Create a new Kelly calculator
    pub fn new(fraction: f64, max_fraction: f64) -> Result<Self, CalcError> {
        validation::positive_f64("fraction", fraction)?;
        let max_fraction = validation::finite("max_fraction", max_fraction)?;
        if max_fraction < 0.0 {
            return Err(CalcError::invalid(
                "max_fraction",
                format!("must not be negative, got {max_fraction}"),
            ));
        }
        Ok(Self {
            fraction,
            max_fraction,
        })
    }

    /// Fraction of the balance to risk
    pub fn stake_fraction(&self, win_rate: f64, avg_win: f64, avg_loss: f64) -> f64 {
        // Fields are public, so a NaN cap can still arrive here
        let cap = if self.max_fraction.is_finite() {
            self.max_fraction.clamp(0.0, KELLY_CAP)
        } else {
            0.0
        };
        match raw_kelly(win_rate, avg_win, avg_loss) {
            Some(kelly) if self.fraction.is_finite() && self.fraction > 0.0 => {
                (kelly * self.fraction).clamp(0.0, cap)
            }
            _ => 0.0,
        }
    }

    /// Amount of the balance to risk, rounded down to cents
    pub fn calculate(
        &self,
        balance: Decimal,
        win_rate: f64,
        avg_win: f64,
        avg_loss: f64,
    ) -> Result<Decimal, CalcError> {
        validation::positive("balance", balance)?;
        // Binary float noise (0.6 - 0.4 = 0.19999999999999996) must not cost a cent
        let fraction = to_decimal(self.stake_fraction(win_rate, avg_win, avg_loss), "kelly fraction")?
            .round_dp(10);
        let stake = checked_mul(balance, fraction, "kelly stake")?;
        Ok(stake.round_dp_with_strategy(2, RoundingStrategy::ToZero).max(dec!(0)))
    }
}

impl Default for KellyCalculator {
    fn default() -> Self {
        Self {
            fraction: 1.0,
            max_fraction: KELLY_CAP,
        }
    }
}
