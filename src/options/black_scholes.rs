//! Black-Scholes pricing and Greeks for European options
//!
//! d1 = (ln(S/K) + (r + σ²/2)·T) / (σ·√T), d2 = d1 − σ·√T
//!
//! At T = 0 the price collapses to intrinsic value and the Greeks to their
//! expiry limits, so `√T` is never used as a divisor.

use super::types::{OptionType, PricingInputs};
use crate::error::CalcError;
use crate::numeric::ensure_finite;
use crate::validation::{self, Validate};
use serde::{Deserialize, Serialize};

/// Option price sensitivities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// dV/dS
    pub delta: f64,
    /// d²V/dS²
    pub gamma: f64,
    /// dV/dt per calendar day
    pub theta: f64,
    /// dV/dσ per 1 volatility point
    pub vega: f64,
    /// dV/dr per 1 rate point
    pub rho: f64,
}

/// A European option priced with Black-Scholes
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    time: f64,
}

impl BlackScholes {
    /// Validate inputs and build a pricer
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        inputs: &PricingInputs,
    ) -> Result<Self, CalcError> {
        validation::positive_f64("underlying_price", spot)?;
        validation::positive_f64("strike_price", strike)?;
        inputs.check()?;
        Ok(Self {
            option_type,
            spot,
            strike,
            rate: inputs.risk_free_rate,
            volatility: inputs.volatility,
            time: inputs.time_to_expiry_years,
        })
    }

    fn expired(&self) -> bool {
        self.time == 0.0
    }

    /// σ·√T underflowed, so the option pays its discounted forward value
    fn deterministic(&self) -> bool {
        self.volatility * self.time.sqrt() == 0.0
    }

    fn discounted_strike(&self) -> f64 {
        self.strike * (-self.rate * self.time).exp()
    }

    fn forward_payoff(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.discounted_strike()).max(0.0),
            OptionType::Put => (self.discounted_strike() - self.spot).max(0.0),
        }
    }

    fn d1_d2(&self) -> (f64, f64) {
        let vol_sqrt_t = self.volatility * self.time.sqrt();
        let d1 = ((self.spot / self.strike).ln()
            + (self.rate + 0.5 * self.volatility * self.volatility) * self.time)
            / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }

    fn intrinsic(&self) -> f64 {
        match self.option_type {
            OptionType::Call => (self.spot - self.strike).max(0.0),
            OptionType::Put => (self.strike - self.spot).max(0.0),
        }
    }

    /// Theoretical price per share
    pub fn price(&self) -> Result<f64, CalcError> {
        if self.expired() {
            return Ok(self.intrinsic());
        }
        if self.deterministic() {
            return ensure_finite(self.forward_payoff(), "black-scholes price");
        }
        let (d1, d2) = self.d1_d2();
        let discount = (-self.rate * self.time).exp();
        let price = match self.option_type {
            OptionType::Call => self.spot * normal_cdf(d1) - self.strike * discount * normal_cdf(d2),
            OptionType::Put => self.strike * discount * normal_cdf(-d2) - self.spot * normal_cdf(-d1),
        };
        // The CDF approximation can dip a hair below zero for deep OTM options
        ensure_finite(price.max(0.0), "black-scholes price")
    }

    /// Delta, gamma, theta, vega and rho
    pub fn greeks(&self) -> Result<Greeks, CalcError> {
        if self.expired() {
            return Ok(self.expiry_greeks());
        }
        if self.deterministic() {
            return self.deterministic_greeks();
        }

        let (d1, d2) = self.d1_d2();
        let sqrt_t = self.time.sqrt();
        let discount = (-self.rate * self.time).exp();
        let pdf_d1 = normal_pdf(d1);

        let delta = match self.option_type {
            OptionType::Call => normal_cdf(d1),
            OptionType::Put => normal_cdf(d1) - 1.0,
        };
        let gamma = pdf_d1 / (self.spot * self.volatility * sqrt_t);

        let decay = -(self.spot * pdf_d1 * self.volatility) / (2.0 * sqrt_t);
        let theta_annual = match self.option_type {
            OptionType::Call => decay - self.rate * self.strike * discount * normal_cdf(d2),
            OptionType::Put => decay + self.rate * self.strike * discount * normal_cdf(-d2),
        };
        let vega = self.spot * sqrt_t * pdf_d1 / 100.0;
        let rho = match self.option_type {
            OptionType::Call => self.strike * self.time * discount * normal_cdf(d2) / 100.0,
            OptionType::Put => -self.strike * self.time * discount * normal_cdf(-d2) / 100.0,
        };

        Ok(Greeks {
            delta: ensure_finite(delta, "delta")?,
            gamma: ensure_finite(gamma, "gamma")?,
            theta: ensure_finite(theta_annual / 365.0, "theta")?,
            vega: ensure_finite(vega, "vega")?,
            rho: ensure_finite(rho, "rho")?,
        })
    }

    /// Zero-volatility limit: only the discounting of an in-the-money strike moves
    fn deterministic_greeks(&self) -> Result<Greeks, CalcError> {
        let strike_pv = self.discounted_strike();
        let (delta, theta_annual, rho) = match self.option_type {
            OptionType::Call if self.spot > strike_pv => {
                (1.0, -self.rate * strike_pv, self.time * strike_pv / 100.0)
            }
            OptionType::Put if self.spot < strike_pv => {
                (-1.0, self.rate * strike_pv, -self.time * strike_pv / 100.0)
            }
            _ => (0.0, 0.0, 0.0),
        };
        Ok(Greeks {
            delta,
            gamma: 0.0,
            theta: ensure_finite(theta_annual / 365.0, "theta")?,
            vega: 0.0,
            rho: ensure_finite(rho, "rho")?,
        })
    }

    /// Greeks of an option at expiry: a step delta, everything else flat
    fn expiry_greeks(&self) -> Greeks {
        let delta = match self.option_type {
            OptionType::Call if self.spot > self.strike => 1.0,
            OptionType::Put if self.spot < self.strike => -1.0,
            _ => 0.0,
        };
        Greeks {
            delta,
            gamma: 0.0,
            theta: 0.0,
            vega: 0.0,
            rho: 0.0,
        }
    }
}

/// Standard normal PDF
pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF approximation (Abramowitz and Stegun)
pub fn normal_cdf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    0.5 * (1.0 + sign * y)
}
