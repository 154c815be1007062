//! Sharpe ratio over a caller-supplied return series

use super::types::SharpeRatio;
use crate::error::CalcError;
use crate::numeric::ensure_finite;
use crate::validation;

/// `(mean − risk_free) / sample_std_dev` for per-period returns.
///
/// `risk_free_rate` is per period. A flat series yields `Undefined`.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> Result<SharpeRatio, CalcError> {
    validation::finite("risk_free_rate", risk_free_rate)?;
    if returns.len() < 2 {
        return Err(CalcError::invalid(
            "returns",
            format!("need at least 2 returns, got {}", returns.len()),
        ));
    }
    for &r in returns {
        validation::finite("returns", r)?;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|&r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = ensure_finite(variance.sqrt(), "return standard deviation")?;

    // Summation noise leaves a flat series with a deviation of a few ulps
    let flat = returns.iter().all(|&r| r == returns[0]);
    if flat || std_dev <= f64::EPSILON * mean.abs().max(1.0) {
        return Ok(SharpeRatio::Undefined);
    }
    let ratio = ensure_finite((mean - risk_free_rate) / std_dev, "sharpe ratio")?;
    Ok(SharpeRatio::Defined(ratio))
}

impl SharpeRatio {
    /// Scale a per-period ratio by `√periods_per_year` (252 for daily returns)
    pub fn annualized(self, periods_per_year: f64) -> Result<Self, CalcError> {
        let periods = validation::positive_f64("periods_per_year", periods_per_year)?;
        match self {
            Self::Defined(ratio) => Ok(Self::Defined(ensure_finite(
                ratio * periods.sqrt(),
                "annualized sharpe ratio",
            )?)),
            Self::Undefined => Ok(Self::Undefined),
        }
    }
}
